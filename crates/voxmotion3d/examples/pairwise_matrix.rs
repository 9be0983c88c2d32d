use voxmotion3d::animation::{Animation, MocapAnimation};
use voxmotion3d::config::SENTINEL_DISTANCE;
use voxmotion3d::engine::PairwiseDistanceEngine;
use voxmotion3d::math::{Point, Real};

/// A joint hierarchy translated along `dir` at every frame, each joint with its own offset.
fn walk(id: usize, category: i32, dir: [Real; 3], num_frames: usize) -> MocapAnimation {
    let frames = (0..num_frames)
        .map(|t| {
            (0..31)
                .map(|joint| {
                    let height = joint as Real * 0.5 - 8.0;
                    Point::new(
                        dir[0] * t as Real - 10.0,
                        dir[1] * t as Real + height,
                        dir[2] * t as Real,
                    )
                })
                .collect()
        })
        .collect();
    MocapAnimation::new(id, category, frames)
}

fn main() {
    let animations = vec![
        walk(0, 0, [1.0, 0.0, 0.0], 20),
        walk(1, 0, [1.1, 0.0, 0.0], 18),
        walk(2, 1, [0.0, 0.0, 1.0], 20),
        walk(3, 1, [0.0, 0.2, 1.0], 20),
        walk(4, 2, [0.0, 0.0, 0.0], 10),
    ];

    let engine = PairwiseDistanceEngine::new(animations).expect("identifiers must be 0..n");
    let outcome = engine.run().wait();
    let result = match &*outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Similarity computation failed: {}", e);
            return;
        }
    };

    for id in result.descriptors.ids() {
        let grid = result.descriptors.get(id).unwrap();
        println!("Animation {}: {} occupied voxels", id, grid.num_occupied());
    }

    let distances = &result.distances;
    for i in 0..distances.dim() {
        let row: Vec<_> = distances
            .row(i)
            .iter()
            .map(|d| {
                if *d == SENTINEL_DISTANCE {
                    "     inf".to_string()
                } else {
                    format!("{:8.3}", d)
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    for anim in engine.animations() {
        let id = anim.id();
        println!(
            "Nearest to {} (category {}): {:?}",
            id,
            anim.category(),
            distances.nearest_neighbors(id, 2)
        );
    }
}
