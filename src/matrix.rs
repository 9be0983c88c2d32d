//! The pairwise distance matrix.

use crate::animation::AnimationId;
use crate::config::SENTINEL_DISTANCE;
use crate::math::Real;
use alloc::vec::Vec;
use approx::{AbsDiffEq, RelativeEq};
use core::ops::Index;
use ordered_float::OrderedFloat;
use rayon::prelude::*;

/// A dense square matrix of distances between animations.
///
/// Rows and columns are indexed by animation identifiers. Every cell starts
/// with the value [`SENTINEL_DISTANCE`], meaning "unknown" or "infinitely
/// far". The pairwise engine never writes the diagonal, which therefore keeps
/// the sentinel value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DistanceMatrix {
    dim: usize,
    data: Vec<Real>, // Row-major.
}

impl DistanceMatrix {
    /// A `dim × dim` matrix filled with [`SENTINEL_DISTANCE`].
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            data: vec![SENTINEL_DISTANCE; dim * dim],
        }
    }

    /// The number of rows (and columns) of this matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The distance between the animations `i` and `j`, if both are in range.
    pub fn get(&self, i: AnimationId, j: AnimationId) -> Option<Real> {
        if i < self.dim && j < self.dim {
            Some(self.data[i * self.dim + j])
        } else {
            None
        }
    }

    /// Is the distance between `i` and `j` something other than the sentinel?
    pub fn is_known(&self, i: AnimationId, j: AnimationId) -> bool {
        self.get(i, j)
            .is_some_and(|dist| dist != SENTINEL_DISTANCE)
    }

    /// The distances from the animation `i` to every animation.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.dim()`.
    pub fn row(&self, i: AnimationId) -> &[Real] {
        assert!(i < self.dim, "distance matrix row out of bounds");
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// All the cells of this matrix, in row-major order.
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Sets the distance between `i` and `j`, in both directions.
    pub fn set_symmetric(&mut self, i: AnimationId, j: AnimationId, dist: Real) {
        self.data[i * self.dim + j] = dist;
        self.data[j * self.dim + i] = dist;
    }

    /// Does `self[(i, j)] == self[(j, i)]` hold for every pair of animations?
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (0..i).all(|j| self[(i, j)] == self[(j, i)]))
    }

    /// The `k` animations closest to the animation `id`, closest first.
    ///
    /// The animation itself and the animations at the sentinel distance are
    /// skipped. Ties are broken by increasing identifier.
    pub fn nearest_neighbors(&self, id: AnimationId, k: usize) -> Vec<(AnimationId, Real)> {
        if id >= self.dim {
            return Vec::new();
        }

        let mut neighbors: Vec<_> = self
            .row(id)
            .iter()
            .copied()
            .enumerate()
            .filter(|(other, dist)| *other != id && *dist != SENTINEL_DISTANCE)
            .collect();
        neighbors.sort_by_key(|(other, dist)| (OrderedFloat(*dist), *other));
        neighbors.truncate(k);
        neighbors
    }

    /// Splits this matrix into the strictly-lower-triangular part of each row.
    ///
    /// The item for the row `i` is `(i, &mut self[(i, 0..i)])`. These slices are
    /// disjoint so each of them can be filled by a different worker.
    pub(crate) fn par_lower_rows_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (usize, &mut [Real])> + '_ {
        self.data
            .par_chunks_mut(self.dim.max(1))
            .enumerate()
            .map(|(i, row)| (i, &mut row[..i]))
    }

    /// Copies the strictly-lower-triangular part of this matrix to its upper part.
    pub(crate) fn mirror_lower_triangle(&mut self) {
        for i in 0..self.dim {
            for j in 0..i {
                let upper = j * self.dim + i;
                debug_assert_eq!(
                    self.data[upper].to_bits(),
                    SENTINEL_DISTANCE.to_bits(),
                    "the cell ({}, {}) was written twice",
                    j,
                    i
                );
                self.data[upper] = self.data[i * self.dim + j];
            }
        }
    }
}

impl Index<(AnimationId, AnimationId)> for DistanceMatrix {
    type Output = Real;

    #[inline]
    fn index(&self, (i, j): (AnimationId, AnimationId)) -> &Real {
        assert!(
            i < self.dim && j < self.dim,
            "distance matrix index out of bounds"
        );
        &self.data[i * self.dim + j]
    }
}

impl AbsDiffEq for DistanceMatrix {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for DistanceMatrix {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
