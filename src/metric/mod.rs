//! Distances between occupancy grids.

pub use self::dice::{dice_coefficient, dice_distance, DiceDistance, OverlapCounts};

mod dice;
