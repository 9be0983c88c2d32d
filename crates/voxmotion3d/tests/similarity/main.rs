mod common;
mod dice_properties;
mod pairwise_scenarios;
mod voxelization;
