use crate::animation::{Animation, AnimationId};
use crate::config::{voxel_key, SimilarityConfig};
use crate::math::{Point, Real};
use crate::voxelization::{clip_segment, rasterize_line, OccupancyGrid};
use crate::{Result, SimilarityError};

/// The occupancy grid computed for one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voxelization {
    /// Identifier of the voxelized animation.
    pub id: AnimationId,
    /// The volume swept by the tracked joints.
    pub grid: OccupancyGrid,
    /// Number of voxels of the swept segments lying outside of the grid.
    ///
    /// Saturates at `usize::MAX`.
    pub num_clipped: usize,
}

/// Converts the joint trajectories of an animation into an [`OccupancyGrid`].
///
/// For every tracked joint and every pair of consecutive frames, both joint
/// positions are mapped to grid coordinates with
/// [`SimilarityConfig::voxel_space_point`] and every voxel of the discrete
/// line joining them is marked as occupied. Rasterizing the whole segment,
/// rather than its endpoints only, keeps fast motions from leaving holes in
/// the swept volume.
///
/// Segments are clipped to the grid box before being rasterized. The voxels
/// of their clipped parts are only counted: a segment leaving the grid still
/// marks the voxels of its in-grid part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelEncoder {
    config: SimilarityConfig,
}

impl VoxelEncoder {
    /// Creates an encoder producing grids as described by `config`.
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// The configuration of this encoder.
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Voxelizes the trajectories of all the tracked joints of `anim`.
    ///
    /// An animation with less than two frames has no motion and yields an
    /// empty grid. Fails with [`SimilarityError::MissingJoints`] if `anim`
    /// has moving frames but exposes fewer joints than tracked, and with
    /// [`SimilarityError::NonFinitePosition`] if a tracked joint position
    /// has a NaN or infinite component.
    pub fn voxelize<A: Animation + ?Sized>(&self, anim: &A) -> Result<Voxelization> {
        let id = anim.id();
        let mut grid = OccupancyGrid::new(self.config.grid_shape());
        let mut num_clipped: usize = 0;

        if anim.num_frames() >= 2 {
            if anim.num_joints() < self.config.num_tracked_joints {
                return Err(SimilarityError::MissingJoints {
                    id,
                    expected: self.config.num_tracked_joints,
                    found: anim.num_joints(),
                });
            }

            for joint in 0..self.config.num_tracked_joints {
                let mut prev = self.voxel_space_position(anim, joint, 0)?;

                for frame in 1..anim.num_frames() {
                    let curr = self.voxel_space_position(anim, joint, frame)?;
                    let clipped = sweep_segment(&mut grid, &prev, &curr);
                    num_clipped = num_clipped.saturating_add(clipped);
                    prev = curr;
                }
            }
        }

        if num_clipped > 0 {
            log::debug!(
                "animation {}: discarded {} voxels outside of the {:?} grid",
                id,
                num_clipped,
                grid.shape()
            );
        }

        Ok(Voxelization {
            id,
            grid,
            num_clipped,
        })
    }

    fn voxel_space_position<A: Animation + ?Sized>(
        &self,
        anim: &A,
        joint: usize,
        frame: usize,
    ) -> Result<Point<f64>> {
        let position: Point<Real> = anim.joint_position(joint, frame);

        if !position.coords.iter().all(|e| e.is_finite()) {
            return Err(SimilarityError::NonFinitePosition {
                id: anim.id(),
                joint,
                frame,
            });
        }

        Ok(self.config.voxel_space_point(&position))
    }
}

/// Marks the in-grid voxels of the segment `[pa, pb]`, given in grid coordinates.
///
/// Returns the number of voxels of the segment lying outside of the grid.
fn sweep_segment(grid: &mut OccupancyGrid, pa: &Point<f64>, pb: &Point<f64>) -> usize {
    let shape = grid.shape();
    let mins = Point::new(-0.5, -0.5, -0.5);
    let maxs = Point::new(
        shape[0] as f64 - 0.5,
        shape[1] as f64 - 0.5,
        shape[2] as f64 - 0.5,
    );

    // Length of the unclipped line, computed without walking it.
    let extent = (pb.coords.map(f64::round) - pa.coords.map(f64::round))
        .abs()
        .max();
    let num_voxels = (extent + 1.0) as usize;

    let Some((start, end)) = clip_segment(pa, pb, &mins, &maxs) else {
        return num_voxels;
    };

    // Clipped endpoints lying exactly on the grid boundary may round to a
    // voxel just outside of it; such voxels are rejected by `set_occupied`.
    let mut num_written = 0;
    rasterize_line(voxel_key(&start), voxel_key(&end), |key| {
        if grid.set_occupied(key) {
            num_written += 1;
        }
    });

    num_voxels.saturating_sub(num_written)
}
