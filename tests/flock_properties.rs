use approx::assert_relative_eq;
use flocks::{BoidId, BoundingBlend, Bounds, FlockId, SimulationParams, World};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const DT: f32 = 0.1;

fn only_separation() -> SimulationParams {
    SimulationParams {
        cohesion_strength: 0.0,
        separation_strength: 1.0,
        align_strength: 0.0,
        bound_strength: 0.0,
        ..SimulationParams::default()
    }
}

fn only_cohesion() -> SimulationParams {
    SimulationParams {
        cohesion_strength: 1.0,
        separation_strength: 0.0,
        align_strength: 0.0,
        bound_strength: 0.0,
        ..SimulationParams::default()
    }
}

fn world_with(params: SimulationParams, flocks: &[Vec<Vec3>]) -> World {
    let mut world = World::new(params).unwrap();
    for positions in flocks {
        world.create_flock(positions.clone()).unwrap();
    }
    world
}

#[test]
fn headings_are_unit_length_after_each_tick() {
    let params = SimulationParams {
        flock_count: 2,
        ..SimulationParams::default()
    };
    let mut world = World::spawn(params).unwrap();

    for _ in 0..30 {
        let stats = world.advance_tick(1.0 / 60.0).unwrap();
        for boid in world.boids() {
            if boid.direction == Vec3::ZERO {
                continue;
            }
            assert_relative_eq!(boid.direction.length(), 1.0, epsilon = 1e-4);
        }
        assert!(stats.degenerate_directions <= stats.boids);
    }
}

#[test]
fn aggregates_follow_external_perturbation() {
    let mut world = world_with(
        SimulationParams::default(),
        &[vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]],
    );
    world.advance_tick(DT).unwrap();
    let flock_id = FlockId(0);
    assert!(world.flock(flock_id).unwrap().average_position().x > 0.9);

    // Move the whole flock far down the z axis between ticks
    for index in 0..2 {
        let boid = world.boid_mut(BoidId { flock: flock_id, index }).unwrap();
        boid.position = Vec3::new(0.0, 0.0, -100.0 - index as f32);
    }
    world.advance_tick(DT).unwrap();

    let average = world.flock(flock_id).unwrap().average_position();
    assert_relative_eq!(average.z, -1.0, epsilon = 1e-5);
}

#[test]
fn processing_order_within_a_tick_does_not_matter() {
    // Spacing under 1 so separation sees neighbors
    let positions: Vec<Vec3> = flocks::spawn::lattice_positions(3, Vec3::splat(0.3))
        .into_iter()
        .map(|p| p * 0.8)
        .collect();

    let mut permutation: Vec<usize> = (0..positions.len()).collect();
    permutation.shuffle(&mut StdRng::seed_from_u64(42));
    let shuffled: Vec<Vec3> = permutation.iter().map(|&i| positions[i]).collect();

    let mut ordered = world_with(SimulationParams::default(), &[positions]);
    let mut permuted = world_with(SimulationParams::default(), &[shuffled]);
    ordered.advance_tick(DT).unwrap();
    permuted.advance_tick(DT).unwrap();

    let ordered_boids = ordered.flocks()[0].boids();
    let permuted_boids = permuted.flocks()[0].boids();
    for (j, &i) in permutation.iter().enumerate() {
        let a = &ordered_boids[i];
        let b = &permuted_boids[j];
        assert!(
            a.direction.abs_diff_eq(b.direction, 1e-5),
            "boid {i}: {} vs {}",
            a.direction,
            b.direction
        );
        assert!(a.position.abs_diff_eq(b.position, 1e-5));
    }
}

#[test]
fn separation_pushes_close_boids_apart() {
    let mut world = world_with(only_separation(), &[vec![Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)]]);
    world.advance_tick(DT).unwrap();

    let boids = world.flocks()[0].boids();
    let a = boids[0].direction;
    let b = boids[1].direction;
    assert!(a.x < 0.0);
    assert!(b.x > 0.0);
    assert_relative_eq!(a.dot(b), -1.0, epsilon = 1e-5);
}

#[test]
fn separation_reaches_across_flocks() {
    let mut world = world_with(
        only_separation(),
        &[vec![Vec3::ZERO], vec![Vec3::new(0.0, 0.5, 0.0)]],
    );
    let stats = world.advance_tick(DT).unwrap();

    assert_eq!(stats.neighbor_hits, 2);
    assert_relative_eq!(world.flocks()[0].boids()[0].direction.y, -1.0, epsilon = 1e-6);
    assert_relative_eq!(world.flocks()[1].boids()[0].direction.y, 1.0, epsilon = 1e-6);
}

#[test]
fn boids_out_of_range_do_not_separate() {
    let mut world = world_with(only_separation(), &[vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]]);
    let stats = world.advance_tick(DT).unwrap();

    assert_eq!(stats.neighbor_hits, 0);
    assert_eq!(stats.degenerate_directions, 2);
    for boid in world.boids() {
        assert_eq!(boid.direction, Vec3::ZERO);
    }
}

#[test]
fn bounding_leaves_heading_alone_inside_start() {
    let bounds = Bounds {
        center: Vec3::ZERO,
        start: 15.0,
        radius: 20.0,
        strength: 1.0,
        blend: BoundingBlend::RawDistance,
    };
    let mut world = world_with(SimulationParams::default(), &[vec![Vec3::new(10.0, 0.0, 0.0)]]);
    let boid = world.boid_mut(BoidId { flock: FlockId(0), index: 0 }).unwrap();
    boid.direction = Vec3::new(0.0, 0.6, 0.8);

    assert!(!boid.apply_bounding(&bounds));
    assert_eq!(boid.direction, Vec3::new(0.0, 0.6, 0.8));
}

#[test]
fn bounding_pulls_stray_boids_towards_center() {
    let params = SimulationParams {
        cohesion_strength: 0.0,
        separation_strength: 0.0,
        align_strength: 0.0,
        ..SimulationParams::default()
    };
    let mut world = world_with(params, &[vec![Vec3::new(0.0, 0.0, 40.0)]]);
    let stats = world.advance_tick(DT).unwrap();

    assert_eq!(stats.bounded_boids, 1);
    assert_relative_eq!(world.flocks()[0].boids()[0].direction.z, -1.0, epsilon = 1e-6);
}

#[test]
fn bounding_follows_a_moved_center() {
    let params = SimulationParams {
        cohesion_strength: 0.0,
        separation_strength: 0.0,
        align_strength: 0.0,
        ..SimulationParams::default()
    };
    let mut world = world_with(params, &[vec![Vec3::ZERO]]);
    world.set_bounding_center(Vec3::new(100.0, 0.0, 0.0)).unwrap();
    world.advance_tick(DT).unwrap();

    assert_relative_eq!(world.flocks()[0].boids()[0].direction.x, 1.0, epsilon = 1e-6);
}

#[test]
fn cohesion_steers_towards_average_position() {
    let start = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
    let mut world = world_with(only_cohesion(), &[start.to_vec()]);
    world.advance_tick(DT).unwrap();

    let flock = &world.flocks()[0];
    // Normalized mean of (0,0,0) and (10,0,0)
    assert_relative_eq!(flock.average_position().x, 1.0, epsilon = 1e-6);

    for (boid, prev) in flock.boids().iter().zip(start) {
        let towards = flock.average_position() - prev;
        assert!(boid.direction.dot(towards) > 0.0);
    }
    assert_relative_eq!(flock.boids()[0].direction.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(flock.boids()[1].direction.x, -1.0, epsilon = 1e-6);
}

#[test]
fn full_tick_moves_by_speed_times_dt() {
    let start = vec![
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(-1.5, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
    ];
    let params = SimulationParams {
        speed: 5.0,
        ..SimulationParams::default()
    };
    let mut world = world_with(params, &[start.clone()]);
    world.advance_tick(DT).unwrap();

    for (boid, prev) in world.flocks()[0].boids().iter().zip(start) {
        assert_relative_eq!(boid.direction.length(), 1.0, epsilon = 1e-5);
        let expected = prev + boid.direction * 0.5;
        assert!(boid.position.abs_diff_eq(expected, 1e-5));
        assert_eq!(boid.facing, boid.direction);
    }
}

#[test]
fn parameter_changes_apply_on_next_tick() {
    let mut world = world_with(SimulationParams::default(), &[vec![Vec3::ZERO, Vec3::X * 3.0]]);
    world.advance_tick(DT).unwrap();

    let frozen = SimulationParams {
        speed: 0.0,
        ..SimulationParams::default()
    };
    world.set_params(frozen).unwrap();
    let before: Vec<Vec3> = world.boids().map(|b| b.position).collect();
    world.advance_tick(DT).unwrap();
    let after: Vec<Vec3> = world.boids().map(|b| b.position).collect();

    assert_eq!(before, after);
}

#[test]
fn zero_heading_keeps_boid_in_place() {
    let params = SimulationParams {
        cohesion_strength: 0.0,
        separation_strength: 0.0,
        align_strength: 0.0,
        bound_strength: 0.0,
        ..SimulationParams::default()
    };
    let mut world = world_with(params, &[vec![Vec3::new(1.0, 2.0, 3.0)]]);
    let stats = world.advance_tick(DT).unwrap();

    let boid = &world.flocks()[0].boids()[0];
    assert_eq!(stats.degenerate_directions, 1);
    assert_eq!(boid.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(boid.facing, Vec3::Z);
}
