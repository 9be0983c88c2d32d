use crate::animation::{Animation, AnimationId};
use crate::config::{SimilarityConfig, SENTINEL_DISTANCE};
use crate::engine::stage::{
    catch_task, CollectionId, Stage, StageHandle, StageReport, TaskFailure,
};
use crate::math::Real;
use crate::matrix::DistanceMatrix;
use crate::metric::DiceDistance;
use crate::store::DescriptorStore;
use crate::voxelization::{OccupancyGrid, VoxelEncoder};
use crate::{Result, SimilarityError};
use alloc::sync::Arc;
use alloc::vec::Vec;
use rayon::prelude::*;

/// The report of the descriptor computation stage.
pub type DescriptorsReport = StageReport<DescriptorStore>;

/// The report of the distance computation stage.
pub type DistancesReport = StageReport<DistanceMatrix>;

/// Proof that every descriptor of a collection of animations was computed.
///
/// This can only be obtained from a [`DescriptorsReport`] without failures,
/// so the distance stage can never start on a partially populated store. It
/// remembers the collection it was computed for and is only accepted by the
/// engines comparing that collection.
#[derive(Clone, Debug)]
pub struct ReadyDescriptors {
    store: Arc<DescriptorStore>,
    collection: CollectionId,
}

impl ReadyDescriptors {
    /// The complete descriptor store.
    pub fn store(&self) -> &Arc<DescriptorStore> {
        &self.store
    }
}

impl DescriptorsReport {
    /// The complete descriptor store, if every animation was voxelized.
    ///
    /// Fails with [`SimilarityError::StageFailed`] otherwise.
    pub fn ready(&self) -> Result<ReadyDescriptors> {
        self.result().map(|store| ReadyDescriptors {
            store,
            collection: self.collection,
        })
    }
}

/// Everything computed by a full run of the [`PairwiseDistanceEngine`].
#[derive(Clone, Debug)]
pub struct SimilarityResult {
    /// The occupancy grid of every animation.
    pub descriptors: Arc<DescriptorStore>,
    /// The distance between every pair of animations.
    pub distances: Arc<DistanceMatrix>,
}

/// Checks that the animation at index `i` has the identifier `i`.
pub fn validate_identifiers<A: Animation>(animations: &[A]) -> Result<()> {
    match animations
        .iter()
        .enumerate()
        .find(|(index, anim)| anim.id() != *index)
    {
        Some((index, anim)) => Err(SimilarityError::UnorderedIdentifiers {
            index,
            id: anim.id(),
        }),
        None => Ok(()),
    }
}

/// Computes the distances between all pairs of a collection of animations.
///
/// The computation has two stages, each running in parallel on the rayon
/// thread pool:
///
/// 1. [`Self::compute_descriptors`] voxelizes every animation into an
///    [`OccupancyGrid`] and publishes them in a [`DescriptorStore`].
/// 2. [`Self::compute_all_distances`] computes the [`DiceDistance`] between
///    the grids of every pair of animations.
///
/// Stage 2 needs a [`ReadyDescriptors`] that only a successful stage 1 can
/// produce. [`Self::run`] chains both stages.
///
/// The animation at index `i` of the collection must have the identifier `i`;
/// this is checked when the engine is created. Clones of an engine share its
/// collection, and thus accept each other's descriptors.
///
/// # Example
///
/// ```
/// use voxmotion3d::animation::MocapAnimation;
/// use voxmotion3d::config::SENTINEL_DISTANCE;
/// use voxmotion3d::engine::PairwiseDistanceEngine;
/// use voxmotion3d::math::Point;
///
/// let still = |id, x: f32| MocapAnimation::new(id, 0, vec![vec![Point::new(x, 0.0, 0.0); 31]; 2]);
/// let engine = PairwiseDistanceEngine::new(vec![still(0, 0.0), still(1, 0.0), still(2, 8.0)]).unwrap();
///
/// let report = engine.compute_descriptors().wait();
/// let ready = report.ready().unwrap();
/// let distances = engine.compute_all_distances(ready).unwrap().wait();
/// let matrix = distances.result().unwrap();
///
/// assert_eq!(matrix[(0, 1)], 1.0);
/// assert_eq!(matrix[(2, 0)], SENTINEL_DISTANCE);
/// ```
pub struct PairwiseDistanceEngine<A> {
    animations: Arc<[A]>,
    collection: CollectionId,
    config: SimilarityConfig,
}

impl<A> Clone for PairwiseDistanceEngine<A> {
    fn clone(&self) -> Self {
        Self {
            animations: self.animations.clone(),
            collection: self.collection,
            config: self.config.clone(),
        }
    }
}

impl<A: Animation + 'static> PairwiseDistanceEngine<A> {
    /// An engine comparing `animations` with the default configuration.
    pub fn new(animations: Vec<A>) -> Result<Self> {
        Self::with_config(animations, SimilarityConfig::default())
    }

    /// An engine comparing `animations` with the given configuration.
    ///
    /// Fails with [`SimilarityError::UnorderedIdentifiers`] if the animation
    /// at index `i` does not have the identifier `i`.
    pub fn with_config(animations: Vec<A>, config: SimilarityConfig) -> Result<Self> {
        validate_identifiers(&animations)?;
        Ok(Self {
            animations: Arc::from(animations),
            collection: CollectionId::next(),
            config,
        })
    }

    /// The compared animations.
    pub fn animations(&self) -> &[A] {
        &self.animations
    }

    /// The configuration of this engine.
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Starts voxelizing every animation.
    ///
    /// The grids are published in the store only once every animation has
    /// been processed. Animations whose voxelization failed are listed in the
    /// report and have no descriptor in the store.
    pub fn compute_descriptors(&self) -> StageHandle<DescriptorsReport> {
        let animations = self.animations.clone();
        let collection = self.collection;
        let encoder = VoxelEncoder::new(self.config.clone());

        StageHandle::spawn(move || {
            log::debug!("voxelizing {} animations", animations.len());

            let results: Vec<_> = animations
                .par_iter()
                .map(|anim| (anim.id(), catch_task(|| encoder.voxelize(anim))))
                .collect();

            let store = DescriptorStore::with_capacity(results.len());
            let mut failures = Vec::new();

            for (id, result) in results {
                match result {
                    Ok(voxelization) => {
                        let _ = store.put(id, voxelization.grid);
                    }
                    Err(reason) => failures.push(TaskFailure { id, reason }),
                }
            }

            log::debug!("computed {} descriptors", store.len());
            StageReport::new(Stage::Descriptors, collection, store, failures)
        })
    }

    /// Starts computing the distance between every pair of animations.
    ///
    /// The task for the animation `id` compares it with every animation with
    /// a smaller identifier, so each pair is handled exactly once. The
    /// matrix diagonal is left to [`SENTINEL_DISTANCE`].
    ///
    /// Fails immediately, without starting anything, with
    /// [`SimilarityError::ForeignDescriptors`] if `descriptors` were not
    /// computed by this engine or one of its clones, or with
    /// [`SimilarityError::MissingDescriptor`] if a descriptor is missing.
    pub fn compute_all_distances(
        &self,
        descriptors: ReadyDescriptors,
    ) -> Result<StageHandle<DistancesReport>> {
        if descriptors.collection != self.collection {
            return Err(SimilarityError::ForeignDescriptors);
        }
        validate_identifiers(&self.animations)?;

        let grids = self
            .animations
            .iter()
            .map(|anim| descriptors.store.get(anim.id()))
            .collect::<Result<Vec<_>>>()?;
        let metric = DiceDistance::new(self.config.dice_epsilon);
        let collection = self.collection;

        Ok(StageHandle::spawn(move || {
            log::debug!("computing distances between {} animations", grids.len());

            let mut matrix = DistanceMatrix::new(grids.len());
            let failures: Vec<_> = matrix
                .par_lower_rows_mut()
                .filter_map(|(id, row)| {
                    catch_task(|| fill_lower_row(&metric, &grids, id, row))
                        .err()
                        .map(|reason| TaskFailure { id, reason })
                })
                .collect();

            // All the tasks joined: the lower triangle is final.
            matrix.mirror_lower_triangle();
            StageReport::new(Stage::Distances, collection, matrix, failures)
        }))
    }

    /// Runs both stages, the distance stage starting once all the descriptors
    /// are computed.
    ///
    /// The returned handle finishes with an error if any task of either stage
    /// failed. Use [`Self::compute_descriptors`] and
    /// [`Self::compute_all_distances`] to access partial results.
    pub fn run(&self) -> StageHandle<Result<SimilarityResult>> {
        let engine = self.clone();

        self.compute_descriptors().then(move |report| {
            let distances = report
                .ready()
                .and_then(|ready| engine.compute_all_distances(ready));

            match distances {
                Ok(handle) => {
                    let descriptors = report.output().clone();
                    handle.map(move |report| similarity_result(descriptors, &report))
                }
                Err(err) => StageHandle::completed(Err(err)),
            }
        })
    }
}

fn similarity_result(
    descriptors: Arc<DescriptorStore>,
    distances: &DistancesReport,
) -> Result<SimilarityResult> {
    distances.result().map(|distances| SimilarityResult {
        descriptors,
        distances,
    })
}

/// Fills `row`, the strictly-lower-triangular part of the row `id`.
fn fill_lower_row(
    metric: &DiceDistance,
    grids: &[Arc<OccupancyGrid>],
    id: AnimationId,
    row: &mut [Real],
) -> Result<()> {
    let grid = &grids[id];

    for (id2, cell) in row.iter_mut().enumerate() {
        debug_assert_eq!(
            cell.to_bits(),
            SENTINEL_DISTANCE.to_bits(),
            "the cell ({}, {}) was written twice",
            id,
            id2
        );
        *cell = metric.distance(&grids[id2], grid)?;
    }

    Ok(())
}
