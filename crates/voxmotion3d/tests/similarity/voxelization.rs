use crate::common::{rigid_animation, swing};
use voxmotion3d::math::Point;
use voxmotion3d::voxelization::VoxelEncoder;

#[test]
fn straight_motion_occupies_the_whole_segment() {
    // Grid coordinates (0, 0, 0) then (5, 5, 5).
    let anim = rigid_animation(
        0,
        &[
            Point::new(-20.0, -20.0, -20.0),
            Point::new(-10.0, -10.0, -10.0),
        ],
    );
    let grid = VoxelEncoder::default().voxelize(&anim).unwrap().grid;

    let occupied: Vec<_> = grid.occupied_voxels().collect();
    let expected: Vec<_> = (0..=5).map(|i| Point::new(i, i, i)).collect();
    assert_eq!(occupied, expected);
}

#[test]
fn stationary_joint_occupies_at_most_one_voxel() {
    for pos in [
        Point::new(0.0, 0.0, 0.0),
        Point::new(-3.3, 7.1, 12.9),
        Point::new(100.0, 0.0, 0.0),
    ] {
        let anim = rigid_animation(0, &[pos; 25]);
        let grid = VoxelEncoder::default().voxelize(&anim).unwrap().grid;
        assert!(grid.num_occupied() <= 1);
    }
}

#[test]
fn back_and_forth_motion_matches_a_single_pass() {
    let from = Point::new(-6.0, 1.0, 2.0);
    let to = Point::new(5.0, -4.0, 3.0);
    let encoder = VoxelEncoder::default();

    let single = encoder.voxelize(&rigid_animation(0, &[from, to])).unwrap();
    let swinging = encoder
        .voxelize(&rigid_animation(1, &swing(from, to, 12)))
        .unwrap();

    // Bresenham lines are not symmetric so the way back may add voxels.
    assert!(swinging.grid.num_occupied() >= single.grid.num_occupied());
    assert!(single
        .grid
        .occupied_voxels()
        .all(|key| swinging.grid.is_occupied(key)));
}

#[test]
fn motion_far_outside_of_the_grid_is_dropped() {
    let anim = rigid_animation(
        0,
        &[Point::new(100.0, 100.0, 100.0), Point::new(140.0, 100.0, 100.0)],
    );
    let result = VoxelEncoder::default().voxelize(&anim).unwrap();

    assert_eq!(result.grid.num_occupied(), 0);
    assert_eq!(result.num_clipped, 21 * 31);
}
