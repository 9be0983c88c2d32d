//! The animations consumed by the similarity pipeline.

use crate::math::{Point, Real};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Identifier of an animation.
///
/// Identifiers double as row/column indices of the
/// [`DistanceMatrix`](crate::matrix::DistanceMatrix): a collection of `n`
/// animations must carry the identifiers `0..n`, in that order.
pub type AnimationId = usize;

/// A motion-capture animation: joint positions sampled over frames.
///
/// Loading animations from files is left to the caller; this trait is the
/// only view the pipeline needs. Implementations are read concurrently by
/// several workers so they must be `Send + Sync`.
pub trait Animation: Send + Sync {
    /// The stable identifier of this animation.
    fn id(&self) -> AnimationId;

    /// The number of frames of this animation.
    fn num_frames(&self) -> usize;

    /// The number of joints recorded at every frame.
    fn num_joints(&self) -> usize;

    /// The position of `joint` at the given `frame`.
    ///
    /// Only called with `joint < self.num_joints()` and
    /// `frame < self.num_frames()`.
    fn joint_position(&self, joint: usize, frame: usize) -> Point<Real>;
}

impl<A: Animation + ?Sized> Animation for Arc<A> {
    fn id(&self) -> AnimationId {
        (**self).id()
    }

    fn num_frames(&self) -> usize {
        (**self).num_frames()
    }

    fn num_joints(&self) -> usize {
        (**self).num_joints()
    }

    fn joint_position(&self, joint: usize, frame: usize) -> Point<Real> {
        (**self).joint_position(joint, frame)
    }
}

/// The joint positions of a single frame.
pub type MocapFrame = Vec<Point<Real>>;

/// An in-memory motion-capture animation.
///
/// Besides its frames, an animation carries the identifier of the motion
/// category it was recorded for (e.g. "walk" or "jump"), as found in the
/// motion databases it is typically loaded from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MocapAnimation {
    id: AnimationId,
    category: i32,
    frames: Vec<MocapFrame>,
}

impl MocapAnimation {
    /// Creates an animation from its identifier, motion category and frames.
    pub fn new(id: AnimationId, category: i32, frames: Vec<MocapFrame>) -> Self {
        Self {
            id,
            category,
            frames,
        }
    }

    /// The motion category this animation belongs to.
    pub fn category(&self) -> i32 {
        self.category
    }

    /// All the frames of this animation.
    pub fn frames(&self) -> &[MocapFrame] {
        &self.frames
    }

    /// The `i`-th frame of this animation.
    pub fn frame(&self, i: usize) -> Option<&MocapFrame> {
        self.frames.get(i)
    }
}

impl Animation for MocapAnimation {
    fn id(&self) -> AnimationId {
        self.id
    }

    fn num_frames(&self) -> usize {
        self.frames.len()
    }

    // Frames may be ragged; only the joints present in every frame count.
    fn num_joints(&self) -> usize {
        self.frames.iter().map(Vec::len).min().unwrap_or(0)
    }

    fn joint_position(&self, joint: usize, frame: usize) -> Point<Real> {
        self.frames[frame][joint]
    }
}
