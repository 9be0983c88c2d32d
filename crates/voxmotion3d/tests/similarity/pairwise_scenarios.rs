use crate::common::{random_animation, rigid_animation, swing};
use approx::assert_relative_eq;
use voxmotion3d::animation::MocapAnimation;
use voxmotion3d::config::SENTINEL_DISTANCE;
use voxmotion3d::engine::{PairwiseDistanceEngine, Stage};
use voxmotion3d::math::{Point, Real};
use voxmotion3d::metric::DiceDistance;
use voxmotion3d::SimilarityError;

#[test]
fn identical_animations_are_at_distance_one() {
    let trajectory = swing(Point::new(-4.0, 0.0, 0.0), Point::new(4.0, 2.0, 0.0), 8);
    let engine = PairwiseDistanceEngine::new(vec![
        rigid_animation(0, &trajectory),
        rigid_animation(1, &trajectory),
    ])
    .unwrap();

    let outcome = engine.run().wait();
    let result = (*outcome).as_ref().unwrap();

    assert_eq!(
        result.descriptors.get(0).unwrap(),
        result.descriptors.get(1).unwrap()
    );
    assert_eq!(result.distances[(0, 1)], 1.0);
    assert_eq!(result.distances[(1, 0)], 1.0);
}

#[test]
fn disjoint_animation_is_infinitely_far() {
    let shared = swing(Point::new(-10.0, -10.0, -10.0), Point::new(-6.0, -10.0, -10.0), 6);
    let apart = swing(Point::new(10.0, 10.0, 10.0), Point::new(10.0, 14.0, 10.0), 6);
    let engine = PairwiseDistanceEngine::new(vec![
        rigid_animation(0, &shared),
        rigid_animation(1, &shared),
        rigid_animation(2, &apart),
    ])
    .unwrap();

    let outcome = engine.run().wait();
    let distances = &(*outcome).as_ref().unwrap().distances;

    assert_eq!(distances[(0, 1)], 1.0);
    assert_eq!(distances[(1, 0)], 1.0);
    for (i, j) in [(0, 2), (2, 0), (1, 2), (2, 1), (0, 0), (1, 1), (2, 2)] {
        assert_eq!(distances[(i, j)], SENTINEL_DISTANCE);
    }
}

#[test]
fn random_collection_matrix_is_symmetric_and_consistent() {
    let mut rng = oorandom::Rand32::new(2024);
    let animations: Vec<_> = (0..24).map(|id| random_animation(id, &mut rng)).collect();
    let engine = PairwiseDistanceEngine::new(animations).unwrap();

    let outcome = engine.run().wait();
    let result = (*outcome).as_ref().unwrap();
    let distances = &result.distances;
    let metric = DiceDistance::default();

    assert_eq!(distances.dim(), 24);
    assert_eq!(result.descriptors.ids(), (0..24).collect::<Vec<_>>());
    assert!(distances.is_symmetric());

    for i in 0..24 {
        assert_eq!(distances[(i, i)], SENTINEL_DISTANCE);
        let grid_i = result.descriptors.get(i).unwrap();

        for j in 0..i {
            let grid_j = result.descriptors.get(j).unwrap();
            assert_relative_eq!(distances[(i, j)], metric.distance(&grid_i, &grid_j).unwrap());
        }
    }
}

#[test]
fn staged_api_matches_chained_run() {
    let mut rng = oorandom::Rand32::new(99);
    let animations: Vec<_> = (0..10).map(|id| random_animation(id, &mut rng)).collect();
    let engine = PairwiseDistanceEngine::new(animations).unwrap();

    let descriptors = engine.compute_descriptors().wait();
    assert!(descriptors.is_success());
    let distances = engine
        .compute_all_distances(descriptors.ready().unwrap())
        .unwrap()
        .wait();
    assert!(distances.is_success());

    let outcome = engine.run().wait();
    let chained = (*outcome).as_ref().unwrap();
    assert_relative_eq!(**distances.output(), *chained.distances);
}

#[test]
fn nearest_neighbors_retrieve_similar_motions() {
    let base = swing(Point::new(-6.0, 0.0, 0.0), Point::new(6.0, 0.0, 0.0), 4);
    let longer = swing(Point::new(-6.0, 0.0, 0.0), Point::new(10.0, 0.0, 0.0), 4);
    let other = swing(Point::new(-6.0, 0.0, 0.0), Point::new(-6.0, 12.0, 0.0), 4);
    let engine = PairwiseDistanceEngine::new(vec![
        rigid_animation(0, &base),
        rigid_animation(1, &other),
        rigid_animation(2, &longer),
        rigid_animation(3, &base),
    ])
    .unwrap();

    let outcome = engine.run().wait();
    let distances = &(*outcome).as_ref().unwrap().distances;
    let neighbors = distances.nearest_neighbors(0, 2);

    assert_eq!(neighbors[0], (3, 1.0));
    assert_eq!(neighbors[1].0, 2);
    assert!(distances[(0, 2)] < distances[(0, 1)]);
}

#[test]
fn unordered_collection_is_rejected() {
    let anim = |id| MocapAnimation::new(id, 0, vec![]);

    assert_eq!(
        PairwiseDistanceEngine::new(vec![anim(1), anim(0)]).err(),
        Some(SimilarityError::UnorderedIdentifiers { index: 0, id: 1 })
    );
    assert_eq!(
        PairwiseDistanceEngine::new(vec![anim(0), anim(0)]).err(),
        Some(SimilarityError::UnorderedIdentifiers { index: 1, id: 0 })
    );
}

#[test]
fn far_away_joints_do_not_fail_the_run() {
    let near = swing(Point::new(-4.0, 0.0, 0.0), Point::new(4.0, 0.0, 0.0), 6);
    let far = swing(Point::new(0.0, 0.0, 0.0), Point::new(5.0e9, -5.0e9, 1.0e30), 6);
    let engine = PairwiseDistanceEngine::new(vec![
        rigid_animation(0, &near),
        rigid_animation(1, &far),
    ])
    .unwrap();

    let descriptors = engine.compute_descriptors().wait();
    assert!(descriptors.is_success());

    let outcome = engine.run().wait();
    let result = (*outcome).as_ref().unwrap();
    // Both sweep through the center voxel.
    assert!(result.distances.is_known(0, 1));
}

#[test]
fn missing_markers_fail_the_descriptor_stage() {
    let mut frames = vec![vec![Point::new(1.0, 1.0, 1.0); 31]; 4];
    frames[3][0] = Point::new(Real::NAN, Real::NAN, Real::NAN);
    let engine = PairwiseDistanceEngine::new(vec![
        rigid_animation(0, &[Point::origin(), Point::new(3.0, 0.0, 0.0)]),
        MocapAnimation::new(1, 0, frames),
    ])
    .unwrap();

    let report = engine.compute_descriptors().wait();
    assert_eq!(report.failed_ids(), [1]);
    assert_eq!(
        report.failures()[0].reason,
        SimilarityError::NonFinitePosition {
            id: 1,
            joint: 0,
            frame: 3
        }
        .to_string()
    );
    assert!(report.output().contains(0));

    let outcome = engine.run().wait();
    assert_eq!(
        (*outcome).as_ref().unwrap_err(),
        &SimilarityError::StageFailed {
            stage: Stage::Descriptors,
            failed: vec![1],
        }
    );
}
