use crate::math::Point;
use alloc::vec::Vec;

/// A dense three-dimensional grid of binary occupancy flags.
///
/// Voxels are addressed by integer coordinates `(i, j, k)` with
/// `0 <= i < shape[0]`, `0 <= j < shape[1]` and `0 <= k < shape[2]`. Cells are
/// stored with the `i` coordinate varying fastest.
///
/// # Example
///
/// ```
/// use voxmotion3d::voxelization::OccupancyGrid;
/// use voxmotion3d::math::Point;
///
/// let mut grid = OccupancyGrid::cube(20);
/// assert!(grid.set_occupied(Point::new(1, 2, 3)));
/// // Voxels outside of the grid are discarded.
/// assert!(!grid.set_occupied(Point::new(20, 0, 0)));
/// assert_eq!(grid.num_occupied(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OccupancyGrid {
    shape: [usize; 3],
    num_occupied: usize,
    data: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates an empty grid with the given number of voxels along each axis.
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            shape,
            num_occupied: 0,
            data: vec![false; shape[0] * shape[1] * shape[2]],
        }
    }

    /// Creates an empty grid with `resolution` voxels along every axis.
    pub fn cube(resolution: usize) -> Self {
        Self::new([resolution; 3])
    }

    /// The number of voxels along each axis.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// The total number of voxels, occupied or not.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Does this grid have zero voxels?
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The number of occupied voxels.
    pub fn num_occupied(&self) -> usize {
        self.num_occupied
    }

    /// Is the voxel with the given coordinates part of this grid?
    pub fn contains_key(&self, key: Point<i32>) -> bool {
        self.linear_index(key).is_some()
    }

    /// Is the voxel with the given coordinates occupied?
    ///
    /// Voxels outside of the grid are never occupied.
    pub fn is_occupied(&self, key: Point<i32>) -> bool {
        self.linear_index(key).is_some_and(|id| self.data[id])
    }

    /// Marks the voxel with the given coordinates as occupied.
    ///
    /// Returns `false`, leaving the grid unchanged, if the voxel lies outside
    /// of the grid.
    pub fn set_occupied(&mut self, key: Point<i32>) -> bool {
        let Some(id) = self.linear_index(key) else {
            return false;
        };

        if !self.data[id] {
            self.data[id] = true;
            self.num_occupied += 1;
        }

        true
    }

    /// The occupancy flags of every voxel, `i` varying fastest.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// An iterator through the coordinates of all the occupied voxels.
    pub fn occupied_voxels(&self) -> impl Iterator<Item = Point<i32>> + '_ {
        let [nx, ny, _] = self.shape;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(id, _)| {
                Point::new(
                    (id % nx) as i32,
                    ((id / nx) % ny) as i32,
                    (id / (nx * ny)) as i32,
                )
            })
    }

    fn linear_index(&self, key: Point<i32>) -> Option<usize> {
        let [nx, ny, nz] = self.shape;
        let i = usize::try_from(key.x).ok().filter(|i| *i < nx)?;
        let j = usize::try_from(key.y).ok().filter(|j| *j < ny)?;
        let k = usize::try_from(key.z).ok().filter(|k| *k < nz)?;
        Some(i + j * nx + k * nx * ny)
    }
}
