/*
 * Debug Information Module
 *
 * This module defines the TickStats struct returned by every tick. Hosts can
 * log it or show it next to the simulation.
 *
 * Includes metrics for:
 * - Tick number and number of simulated boids
 * - Separation neighbor hits
 * - Boids pulled by the bounding rule
 * - Boids whose heading collapsed to zero
 * - Time spent computing the tick
 */

use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    /// Tick number after this update (the first tick reports 1).
    pub tick: u64,
    pub boids: usize,
    /// Sum over all boids of the neighbors inside the separation range.
    pub neighbor_hits: usize,
    pub bounded_boids: usize,
    /// Boids that ended the rule pass with a zero heading and did not move.
    pub degenerate_directions: usize,
    pub duration: Duration,
}

impl TickStats {
    /// Mean number of close neighbors per boid this tick.
    pub fn mean_neighbors(&self) -> f32 {
        if self.boids == 0 {
            0.0
        } else {
            self.neighbor_hits as f32 / self.boids as f32
        }
    }
}
