//! Conversion of joint trajectories into occupancy grids.

pub(crate) use self::clip::clip_segment;
pub use self::line::rasterize_line;
pub use self::occupancy_grid::OccupancyGrid;
pub use self::voxel_encoder::{VoxelEncoder, Voxelization};

mod clip;
mod line;
mod occupancy_grid;
mod voxel_encoder;
