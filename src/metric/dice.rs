use crate::config::{DICE_EPSILON, SENTINEL_DISTANCE};
use crate::math::Real;
use crate::voxelization::OccupancyGrid;
use crate::{Result, SimilarityError};

/// Voxel-wise comparison of two occupancy grids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverlapCounts {
    /// Number of voxels occupied in both grids.
    pub true_positives: usize,
    /// Number of voxels occupied only in the first grid.
    pub false_positives: usize,
    /// Number of voxels occupied only in the second grid.
    pub false_negatives: usize,
}

impl OverlapCounts {
    /// Counts the shared and exclusive occupied voxels of two grids.
    ///
    /// Fails with [`SimilarityError::ShapeMismatch`] if the grids do not have
    /// the same shape.
    pub fn between(grid1: &OccupancyGrid, grid2: &OccupancyGrid) -> Result<Self> {
        if grid1.shape() != grid2.shape() {
            return Err(SimilarityError::ShapeMismatch {
                left: grid1.shape(),
                right: grid2.shape(),
            });
        }

        let true_positives = grid1
            .as_slice()
            .iter()
            .zip(grid2.as_slice())
            .filter(|(a, b)| **a && **b)
            .count();

        Ok(Self {
            true_positives,
            false_positives: grid1.num_occupied() - true_positives,
            false_negatives: grid2.num_occupied() - true_positives,
        })
    }

    /// The Dice coefficient `2·tp / (2·tp + fp + fn)`, in `[0, 1]`.
    ///
    /// Two empty grids have a coefficient of zero.
    pub fn dice(&self) -> Real {
        let denom = 2 * self.true_positives + self.false_positives + self.false_negatives;

        if denom == 0 {
            0.0
        } else {
            (2 * self.true_positives) as Real / denom as Real
        }
    }
}

/// A distance between occupancy grids derived from the Dice coefficient.
///
/// The distance is the inverse of the Dice coefficient, so `1.0` is the
/// smallest distance and is reached by grids with identical occupied voxels.
/// Coefficients smaller than `epsilon` map to [`SENTINEL_DISTANCE`].
///
/// This is not a metric in the mathematical sense: the triangle inequality
/// does not hold.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DiceDistance {
    /// Dice coefficients below this threshold are considered as "no overlap".
    pub epsilon: Real,
}

impl Default for DiceDistance {
    fn default() -> Self {
        Self::new(DICE_EPSILON)
    }
}

impl DiceDistance {
    /// A Dice distance with the given degeneracy threshold.
    pub fn new(epsilon: Real) -> Self {
        Self { epsilon }
    }

    /// The distance corresponding to the Dice coefficient `dice`.
    pub fn distance_from_dice(&self, dice: Real) -> Real {
        if dice < self.epsilon {
            SENTINEL_DISTANCE
        } else {
            1.0 / dice
        }
    }

    /// The distance between two grids of the same shape.
    pub fn distance(&self, grid1: &OccupancyGrid, grid2: &OccupancyGrid) -> Result<Real> {
        let dice = OverlapCounts::between(grid1, grid2)?.dice();
        Ok(self.distance_from_dice(dice))
    }
}

/// The Dice coefficient of two grids of the same shape.
pub fn dice_coefficient(grid1: &OccupancyGrid, grid2: &OccupancyGrid) -> Result<Real> {
    OverlapCounts::between(grid1, grid2).map(|counts| counts.dice())
}

/// The Dice distance between two grids, with the default degeneracy threshold.
///
/// # Example
///
/// ```
/// use voxmotion3d::config::SENTINEL_DISTANCE;
/// use voxmotion3d::metric::dice_distance;
/// use voxmotion3d::voxelization::OccupancyGrid;
/// use voxmotion3d::math::Point;
///
/// let mut grid1 = OccupancyGrid::cube(20);
/// let mut grid2 = OccupancyGrid::cube(20);
/// let _ = grid1.set_occupied(Point::new(1, 1, 1));
/// let _ = grid2.set_occupied(Point::new(2, 2, 2));
///
/// assert_eq!(dice_distance(&grid1, &grid1).unwrap(), 1.0);
/// assert_eq!(dice_distance(&grid1, &grid2).unwrap(), SENTINEL_DISTANCE);
/// ```
pub fn dice_distance(grid1: &OccupancyGrid, grid2: &OccupancyGrid) -> Result<Real> {
    DiceDistance::default().distance(grid1, grid2)
}
