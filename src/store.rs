//! Storage of the occupancy grids computed for each animation.

use crate::animation::AnimationId;
use crate::voxelization::OccupancyGrid;
use crate::{Result, SimilarityError};
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use parking_lot::RwLock;

/// An owned copy of the content of a [`DescriptorStore`].
pub type DescriptorMap = HashMap<AnimationId, Arc<OccupancyGrid>>;

/// A thread-safe map from animation identifiers to their occupancy grid.
///
/// A store lives for the duration of one similarity computation. Grids are
/// shared as `Arc`s and never mutated once inserted, so readers such as a
/// visualization front-end can keep them around after the store is dropped.
#[derive(Debug, Default)]
pub struct DescriptorStore {
    descriptors: RwLock<DescriptorMap>,
}

impl DescriptorStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store with room for `capacity` descriptors.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            descriptors: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Inserts the descriptor of the animation `id`.
    ///
    /// Returns the descriptor previously stored for `id`, if any.
    pub fn put(
        &self,
        id: AnimationId,
        grid: impl Into<Arc<OccupancyGrid>>,
    ) -> Option<Arc<OccupancyGrid>> {
        self.descriptors.write().insert(id, grid.into())
    }

    /// The descriptor of the animation `id`.
    pub fn get(&self, id: AnimationId) -> Result<Arc<OccupancyGrid>> {
        self.try_get(id)
            .ok_or(SimilarityError::MissingDescriptor(id))
    }

    /// The descriptor of the animation `id`, or `None` if it is not available yet.
    pub fn try_get(&self, id: AnimationId) -> Option<Arc<OccupancyGrid>> {
        self.descriptors.read().get(&id).cloned()
    }

    /// Is a descriptor stored for the animation `id`?
    pub fn contains(&self, id: AnimationId) -> bool {
        self.descriptors.read().contains_key(&id)
    }

    /// The number of stored descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    /// Is this store empty?
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }

    /// The identifiers of all the stored descriptors, in increasing order.
    pub fn ids(&self) -> Vec<AnimationId> {
        let mut ids: Vec<_> = self.descriptors.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// A copy of the current content of this store.
    pub fn snapshot(&self) -> DescriptorMap {
        self.descriptors.read().clone()
    }
}
