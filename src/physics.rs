/*
 * Physics Module
 *
 * This module runs one simulation tick over every flock:
 * 1. Aggregate phase: each flock recomputes its average position and heading
 * 2. Snapshot: every boid position is frozen into one list
 * 3. Mutation phase: each boid applies cohesion, separation, alignment and
 *    bounding against the frozen data, then moves along its new heading
 *
 * Separation is a brute-force scan over all boids in all flocks. Because the
 * rules only read frozen data plus the boid's own state, the order in which
 * boids are processed within a tick does not change the result.
 */

use std::time::Instant;

use glam::Vec3;
use tracing::trace;

use crate::boid::{Boid, BoidId, Bounds};
use crate::debug::TickStats;
use crate::flock::Flock;
use crate::params::SimulationParams;

/// Read-only inputs shared by every boid in a tick.
#[derive(Debug, Clone)]
pub struct SteeringContext {
    pub snapshot: Vec<(BoidId, Vec3)>,
    pub cohesion_strength: f32,
    pub separation_strength: f32,
    pub align_strength: f32,
    pub neighbor_range_sq: f32,
    pub bounds: Bounds,
}

impl SteeringContext {
    /// Freeze all boid positions and copy the values the rules need.
    pub fn capture(flocks: &[Flock], params: &SimulationParams, bounding_center: Vec3) -> Self {
        let snapshot = flocks
            .iter()
            .flat_map(|flock| flock.boids().iter().map(|boid| (boid.id(), boid.position)))
            .collect();

        Self {
            snapshot,
            cohesion_strength: params.cohesion_strength,
            separation_strength: params.separation_strength,
            align_strength: params.align_strength,
            neighbor_range_sq: params.neighbor_range_sq,
            bounds: Bounds {
                center: bounding_center,
                start: params.bound_start,
                radius: params.bound_radius,
                strength: params.bound_strength,
                blend: params.bounding_blend,
            },
        }
    }
}

/// Per-boid results of one rule pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteerOutcome {
    pub neighbors: usize,
    pub bounded: bool,
}

/// Apply the four rules to one boid, in their fixed order.
pub fn steer_boid(
    boid: &mut Boid,
    ctx: &SteeringContext,
    average_position: Vec3,
    average_direction: Vec3,
) -> SteerOutcome {
    boid.apply_cohesion(average_position, ctx.cohesion_strength);
    let neighbors = boid.apply_separation(&ctx.snapshot, ctx.neighbor_range_sq, ctx.separation_strength);
    boid.apply_alignment(average_direction, ctx.align_strength);
    let bounded = boid.apply_bounding(&ctx.bounds);

    SteerOutcome { neighbors, bounded }
}

// Update every boid in every flock by one tick
pub fn update_flocks(
    flocks: &mut [Flock],
    params: &SimulationParams,
    bounding_center: Vec3,
    dt: f32,
) -> TickStats {
    let started = Instant::now();

    // Aggregates come from pre-tick state only
    for flock in flocks.iter_mut() {
        flock.update_aggregates();
    }

    let ctx = SteeringContext::capture(flocks, params, bounding_center);
    let mut stats = TickStats {
        boids: ctx.snapshot.len(),
        ..TickStats::default()
    };

    for flock in flocks.iter_mut() {
        let average_position = flock.average_position();
        let average_direction = flock.average_direction();

        for boid in flock.boids_mut() {
            let outcome = steer_boid(boid, &ctx, average_position, average_direction);
            stats.neighbor_hits += outcome.neighbors;
            if outcome.bounded {
                stats.bounded_boids += 1;
            }

            if boid.direction == Vec3::ZERO {
                stats.degenerate_directions += 1;
                trace!(boid = %boid.id(), position = ?boid.position, "heading collapsed to zero");
            }

            boid.integrate(params.speed, dt);
        }
    }

    stats.duration = started.elapsed();
    stats
}
