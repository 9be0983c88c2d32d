//! Constants and run-wide configuration of the similarity pipeline.

use crate::math::{Point, Real, Vector};

/// Number of voxels along each axis of an occupancy grid.
pub const GRID_RESOLUTION: usize = 20;

/// Number of joints tracked by the voxelization.
pub const NUM_TRACKED_JOINTS: usize = 31;

/// Translation applied to joint positions before scaling them to grid coordinates.
pub const GRID_OFFSET: Real = 20.0;

/// Scale factor from translated joint positions to grid coordinates.
pub const GRID_SCALE: Real = 0.5;

/// Dice coefficients below this threshold are considered as "no overlap".
pub const DICE_EPSILON: Real = 0.001;

/// The distance meaning "no meaningful similarity" or "not computed".
pub const SENTINEL_DISTANCE: Real = Real::MAX;

/// Parameters shared by every step of one similarity computation.
///
/// All the grids of a run share the same resolution; it is fixed when the
/// [`PairwiseDistanceEngine`](crate::engine::PairwiseDistanceEngine) is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SimilarityConfig {
    /// Number of voxels along each axis of the occupancy grids.
    pub resolution: usize,
    /// Number of joints (starting from joint 0) swept into the grids.
    pub num_tracked_joints: usize,
    /// Translation applied to joint positions before scaling.
    pub offset: Vector<Real>,
    /// Scale factor applied to translated joint positions.
    pub scale: Real,
    /// Dice coefficients below this value map to [`SENTINEL_DISTANCE`].
    pub dice_epsilon: Real,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            resolution: GRID_RESOLUTION,
            num_tracked_joints: NUM_TRACKED_JOINTS,
            offset: Vector::repeat(GRID_OFFSET),
            scale: GRID_SCALE,
            dice_epsilon: DICE_EPSILON,
        }
    }
}

impl SimilarityConfig {
    /// The shape of the occupancy grids built with this configuration.
    pub fn grid_shape(&self) -> [usize; 3] {
        [self.resolution; 3]
    }

    /// Maps a joint position to continuous grid coordinates.
    ///
    /// The position is translated by `offset` then scaled by `scale`. The
    /// voxel `(i, j, k)` covers the coordinates within `0.5` of `(i, j, k)`
    /// along each axis. Computations are done in `f64` so that finite
    /// positions always map to finite coordinates.
    pub fn voxel_space_point(&self, position: &Point<Real>) -> Point<f64> {
        let offset = self.offset.cast::<f64>();
        let scale = self.scale as f64;
        Point::from((position.coords.cast::<f64>() + offset) * scale)
    }

    /// Maps a joint position to the integer coordinates of its voxel.
    ///
    /// See [`Self::voxel_space_point`] and [`voxel_key`]. The result may lie
    /// outside of the grid.
    pub fn grid_coords(&self, position: &Point<Real>) -> Point<i32> {
        voxel_key(&self.voxel_space_point(position))
    }
}

/// The voxel containing a point given in continuous grid coordinates.
///
/// Each component is rounded to the nearest integer, with halfway cases
/// rounded away from zero. Components beyond the range of `i32` saturate.
pub fn voxel_key(point: &Point<f64>) -> Point<i32> {
    point.map(|e| e.round() as i32)
}
