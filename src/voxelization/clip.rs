use crate::math::{Point, DIM};

/// Computes the part of the segment `[pa, pb]` lying inside the box `[mins, maxs]`.
///
/// Returns `None` if the segment does not intersect the box. Endpoints lying
/// inside the box are returned unchanged.
pub fn clip_segment(
    pa: &Point<f64>,
    pb: &Point<f64>,
    mins: &Point<f64>,
    maxs: &Point<f64>,
) -> Option<(Point<f64>, Point<f64>)> {
    let dir = pb - pa;
    let mut tmin: f64 = 0.0;
    let mut tmax: f64 = 1.0;

    for i in 0..DIM {
        if dir[i] == 0.0 {
            if pa[i] < mins[i] || pa[i] > maxs[i] {
                return None;
            }
        } else {
            let denom = 1.0 / dir[i];
            let mut inter_with_near_halfspace = (mins[i] - pa[i]) * denom;
            let mut inter_with_far_halfspace = (maxs[i] - pa[i]) * denom;

            if inter_with_near_halfspace > inter_with_far_halfspace {
                core::mem::swap(
                    &mut inter_with_near_halfspace,
                    &mut inter_with_far_halfspace,
                );
            }

            tmin = tmin.max(inter_with_near_halfspace);
            tmax = tmax.min(inter_with_far_halfspace);

            if tmin > tmax {
                return None;
            }
        }
    }

    let start = if tmin == 0.0 { *pa } else { pa + dir * tmin };
    let end = if tmax == 1.0 { *pb } else { pa + dir * tmax };
    Some((start, end))
}
