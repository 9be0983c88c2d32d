//! Parallel computation of the pairwise distances of a collection of animations.

pub use self::pairwise_engine::{
    validate_identifiers, DescriptorsReport, DistancesReport, PairwiseDistanceEngine,
    ReadyDescriptors, SimilarityResult,
};
pub use self::stage::{Stage, StageHandle, StageReport, TaskFailure};

mod pairwise_engine;
mod stage;
