use crate::math::{Point, DIM};

/// Visits every voxel of the discrete 3D line from `start` to `end`.
///
/// This is the three-dimensional Bresenham algorithm: the line advances by one
/// voxel along its dominant axis at each step, and by zero or one voxel along
/// the two other axes. Both endpoints are visited and no voxel is visited
/// twice. If `start == end`, only `start` is visited.
///
/// # Example
///
/// ```
/// use voxmotion3d::voxelization::rasterize_line;
/// use voxmotion3d::math::Point;
///
/// let mut visited = vec![];
/// rasterize_line(Point::new(0, 0, 0), Point::new(3, 3, 3), |key| visited.push(key));
/// assert_eq!(
///     visited,
///     [
///         Point::new(0, 0, 0),
///         Point::new(1, 1, 1),
///         Point::new(2, 2, 2),
///         Point::new(3, 3, 3),
///     ]
/// );
/// ```
pub fn rasterize_line(start: Point<i32>, end: Point<i32>, mut visit: impl FnMut(Point<i32>)) {
    let delta = end.coords.cast::<i64>() - start.coords.cast::<i64>();
    let step = delta.map(|e| e.signum() as i32);
    let extent = delta.map(i64::abs);

    let mut major = 0;
    for axis in 1..DIM {
        if extent[axis] > extent[major] {
            major = axis;
        }
    }
    let minor = [(major + 1) % DIM, (major + 2) % DIM];
    let len = extent[major];

    // Bresenham error terms of the two minor axes.
    let mut errors = minor.map(|axis| 2 * extent[axis] - len);
    let mut curr = start;
    visit(curr);

    for _ in 0..len {
        curr[major] += step[major];

        for (err, axis) in errors.iter_mut().zip(minor) {
            if *err > 0 {
                curr[axis] += step[axis];
                *err -= 2 * len;
            }
            *err += 2 * extent[axis];
        }

        visit(curr);
    }
}
