use crate::animation::AnimationId;
use crate::engine::Stage;
use alloc::vec::Vec;

/// Errors raised when a precondition of the similarity pipeline is violated.
///
/// Numerical degeneracies are never reported through this type: two grids
/// without meaningful overlap simply get the sentinel distance
/// [`SENTINEL_DISTANCE`](crate::config::SENTINEL_DISTANCE).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// Two occupancy grids with different shapes were compared.
    #[error("cannot compare occupancy grids of shapes {left:?} and {right:?}")]
    ShapeMismatch {
        /// Shape of the first grid.
        left: [usize; 3],
        /// Shape of the second grid.
        right: [usize; 3],
    },

    /// No occupancy grid is stored for the given animation.
    ///
    /// Tolerant read paths (e.g. visualization) should use
    /// [`DescriptorStore::try_get`](crate::store::DescriptorStore::try_get)
    /// and treat the descriptor as "not yet available" instead.
    #[error("no descriptor has been computed for animation {0}")]
    MissingDescriptor(AnimationId),

    /// The animation collection is not ordered by contiguous identifiers.
    ///
    /// The animation at position `index` must have the identifier `index`.
    #[error("the animation at index {index} has identifier {id}; identifiers must be contiguous and sorted")]
    UnorderedIdentifiers {
        /// Position of the offending animation in the collection.
        index: usize,
        /// Identifier found at that position.
        id: AnimationId,
    },

    /// An animation exposes fewer joints than the number of tracked joints.
    #[error("animation {id} has {found} joints but {expected} joints are tracked")]
    MissingJoints {
        /// Identifier of the animation.
        id: AnimationId,
        /// Number of tracked joints.
        expected: usize,
        /// Number of joints exposed by the animation.
        found: usize,
    },

    /// A tracked joint position has a NaN or infinite component.
    #[error("animation {id} has a non-finite position for joint {joint} at frame {frame}")]
    NonFinitePosition {
        /// Identifier of the animation.
        id: AnimationId,
        /// Index of the joint.
        joint: usize,
        /// Index of the frame.
        frame: usize,
    },

    /// Descriptors computed for a collection of animations were given to an
    /// engine comparing another collection.
    #[error("the descriptors were computed for another collection of animations")]
    ForeignDescriptors,

    /// Some tasks of a pipeline stage failed.
    #[error("{stage} failed for animations {failed:?}")]
    StageFailed {
        /// The stage that failed.
        stage: Stage,
        /// Identifiers of the animations whose task failed, in increasing order.
        failed: Vec<AnimationId>,
    },
}

/// Result type of the fallible operations of this crate.
pub type Result<T> = core::result::Result<T, SimilarityError>;
