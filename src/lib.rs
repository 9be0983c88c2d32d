/*!
voxmotion3d
===========

**voxmotion3d** compares motion-capture animations by the volume their joints
sweep through. Each animation is rasterized into a fixed-resolution binary
occupancy grid and grids are compared pairwise with a distance derived from
the Dice coefficient. The result is a symmetric distance matrix usable for
clustering or nearest-neighbor retrieval of similar motions.

```
use voxmotion3d::animation::MocapAnimation;
use voxmotion3d::engine::PairwiseDistanceEngine;
use voxmotion3d::math::Point;

let walk = vec![vec![Point::new(0.0, 0.0, 0.0); 31], vec![Point::new(4.0, 0.0, 0.0); 31]];
let animations = vec![
    MocapAnimation::new(0, 1, walk.clone()),
    MocapAnimation::new(1, 1, walk),
];

let engine = PairwiseDistanceEngine::new(animations).unwrap();
let outcome = engine.run().wait();
let result = (*outcome).as_ref().unwrap();
assert_eq!(result.distances[(0, 1)], 1.0);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod animation;
pub mod config;
pub mod engine;
pub mod matrix;
pub mod metric;
pub mod store;
pub mod voxelization;

mod error;

pub use crate::error::{Result, SimilarityError};

/// Aliases for mathematical types.
pub mod math {
    pub use na::{Point3, Vector3};

    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The dimension of the space.
    pub const DIM: usize = 3;
}
