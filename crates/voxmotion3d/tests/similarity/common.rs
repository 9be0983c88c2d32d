use voxmotion3d::animation::{AnimationId, MocapAnimation};
use voxmotion3d::math::{Point, Real};

/// An animation where all the 31 joints follow the same trajectory.
pub fn rigid_animation(id: AnimationId, trajectory: &[Point<Real>]) -> MocapAnimation {
    let frames = trajectory.iter().map(|pt| vec![*pt; 31]).collect();
    MocapAnimation::new(id, 0, frames)
}

/// A trajectory going back and forth along the segment `[from, to]`.
pub fn swing(from: Point<Real>, to: Point<Real>, num_frames: usize) -> Vec<Point<Real>> {
    (0..num_frames)
        .map(|i| if i % 2 == 0 { from } else { to })
        .collect()
}

/// An animation where each joint moves along its own random trajectory.
pub fn random_animation(id: AnimationId, rng: &mut oorandom::Rand32) -> MocapAnimation {
    let num_frames = 2 + rng.rand_range(0..20) as usize;
    let mut frames = vec![Vec::with_capacity(31); num_frames];

    for _ in 0..31 {
        let mut pos = Point::new(
            rng.rand_float() * 30.0 - 15.0,
            rng.rand_float() * 30.0 - 15.0,
            rng.rand_float() * 30.0 - 15.0,
        );

        for frame in &mut frames {
            frame.push(pos);
            pos.x += rng.rand_float() * 4.0 - 2.0;
            pos.y += rng.rand_float() * 4.0 - 2.0;
            pos.z += rng.rand_float() * 4.0 - 2.0;
        }
    }

    MocapAnimation::new(id, 0, frames)
}
