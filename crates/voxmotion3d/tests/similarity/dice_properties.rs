use crate::common::random_animation;
use voxmotion3d::config::SENTINEL_DISTANCE;
use voxmotion3d::metric::{dice_coefficient, dice_distance, DiceDistance};
use voxmotion3d::voxelization::VoxelEncoder;

#[test]
fn voxelized_animations_satisfy_dice_properties() {
    let mut rng = oorandom::Rand32::new(0xdeadbeef);
    let encoder = VoxelEncoder::default();
    let metric = DiceDistance::default();
    let grids: Vec<_> = (0..12)
        .map(|id| encoder.voxelize(&random_animation(id, &mut rng)).unwrap().grid)
        .collect();

    for grid1 in &grids {
        if grid1.num_occupied() > 0 {
            assert_eq!(dice_distance(grid1, grid1), Ok(1.0));
        }

        for grid2 in &grids {
            let dice = dice_coefficient(grid1, grid2).unwrap();
            let dist = metric.distance(grid1, grid2).unwrap();

            assert!((0.0..=1.0).contains(&dice));
            assert_eq!(dist, metric.distance(grid2, grid1).unwrap());
            assert_eq!(dist, metric.distance_from_dice(dice));

            let shares_voxels = grid1.occupied_voxels().any(|key| grid2.is_occupied(key));
            if !shares_voxels {
                assert_eq!(dist, SENTINEL_DISTANCE);
            }
        }
    }
}

#[test]
fn distance_orders_pairs_like_dice() {
    let mut rng = oorandom::Rand32::new(7);
    let encoder = VoxelEncoder::default();
    let metric = DiceDistance::default();
    let grids: Vec<_> = (0..8)
        .map(|id| encoder.voxelize(&random_animation(id, &mut rng)).unwrap().grid)
        .collect();

    let mut pairs = vec![];
    for (i, grid1) in grids.iter().enumerate() {
        for grid2 in &grids[..i] {
            let dice = dice_coefficient(grid1, grid2).unwrap();
            pairs.push((dice, metric.distance(grid1, grid2).unwrap()));
        }
    }

    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    for w in pairs.windows(2) {
        assert!(w[1].1 <= w[0].1);
    }
}
