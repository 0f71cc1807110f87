/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the flock simulation. The defaults match the
 * classic five-cube scene. Parameters can be loaded from a config file, overridden
 * from the command line, or replaced between ticks; a tick always reads one
 * consistent copy.
 */

use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};
use crate::spawn::{cube_count, SpawnPattern, MAX_AGENTS_PER_AXIS};

/// How the bounding rule turns a boid's distance into a pull weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingBlend {
    /// Feed the raw distance into a clamped lerp between `bound_start` and
    /// `bound_radius`. Any distance of at least 1 clamps to `bound_radius`.
    #[default]
    RawDistance,
    /// Ramp from 0 at `bound_start` to 1 at `bound_radius`.
    Normalized,
}

// Parameters for the simulation; every field is optional in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Side length of the spawn cube, so each flock holds `agents_per_axis³` boids.
    pub agents_per_axis: u32,
    pub speed: f32,
    /// Squared distance under which two boids repel each other.
    pub neighbor_range_sq: f32,
    pub flock_count: u32,
    pub cohesion_strength: f32,
    pub separation_strength: f32,
    pub align_strength: f32,
    /// Distance from the bounding center where the bounding rule starts pulling.
    pub bound_start: f32,
    pub bound_radius: f32,
    pub bound_strength: f32,
    pub bounding_blend: BoundingBlend,
    pub spawn: SpawnPattern,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            agents_per_axis: 5,
            speed: 5.0,
            neighbor_range_sq: 1.0,
            flock_count: 1,
            cohesion_strength: 1.0,
            separation_strength: 1.0,
            align_strength: 1.0,
            bound_start: 15.0,
            bound_radius: 20.0,
            bound_strength: 1.0,
            bounding_blend: BoundingBlend::RawDistance,
            spawn: SpawnPattern::Lattice,
        }
    }
}

/// What changed between two parameter sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    /// A value the tick reads changed; takes effect on the next tick.
    pub steering: bool,
    /// A value only spawning reads changed; has no effect on an existing world.
    pub spawn_only: bool,
}

impl ParamChanges {
    pub fn any(&self) -> bool {
        self.steering || self.spawn_only
    }
}

impl SimulationParams {
    /// Number of boids each spawned flock gets.
    pub fn agents_per_flock(&self) -> usize {
        cube_count(self.agents_per_axis)
    }

    /// Check every value the tick relies on.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("speed", self.speed),
            ("neighbor_range_sq", self.neighbor_range_sq),
            ("cohesion_strength", self.cohesion_strength),
            ("separation_strength", self.separation_strength),
            ("align_strength", self.align_strength),
            ("bound_start", self.bound_start),
            ("bound_radius", self.bound_radius),
            ("bound_strength", self.bound_strength),
        ];

        for (name, value) in floats {
            if !value.is_finite() {
                return Err(FlockError::invalid(name, format!("{value} is not finite")));
            }
        }

        // Strengths feed s / (s + 1), and distances can't be negative
        let non_negative = [
            ("speed", self.speed),
            ("neighbor_range_sq", self.neighbor_range_sq),
            ("cohesion_strength", self.cohesion_strength),
            ("separation_strength", self.separation_strength),
            ("align_strength", self.align_strength),
            ("bound_start", self.bound_start),
            ("bound_strength", self.bound_strength),
        ];

        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(FlockError::invalid(name, format!("{value} is negative")));
            }
        }

        if self.bounding_blend == BoundingBlend::Normalized && self.bound_radius <= self.bound_start {
            return Err(FlockError::invalid(
                "bound_radius",
                format!(
                    "{} must exceed bound_start ({}) for normalized blending",
                    self.bound_radius, self.bound_start
                ),
            ));
        }

        self.spawn.validate()
    }

    /// Validation for building a fresh world: spawn sizes must be usable too.
    pub fn validate_for_spawn(&self) -> Result<()> {
        self.validate()?;

        if self.agents_per_axis == 0 {
            return Err(FlockError::invalid("agents_per_axis", "must be at least 1"));
        }

        if self.agents_per_axis > MAX_AGENTS_PER_AXIS {
            return Err(FlockError::invalid(
                "agents_per_axis",
                format!("{} exceeds the maximum of {MAX_AGENTS_PER_AXIS}", self.agents_per_axis),
            ));
        }

        if self.flock_count == 0 {
            return Err(FlockError::invalid("flock_count", "must be at least 1"));
        }

        Ok(())
    }

    // Check which parameters have changed compared to a previous set
    pub fn detect_changes(&self, previous: &SimulationParams) -> ParamChanges {
        let steering = self.speed != previous.speed
            || self.neighbor_range_sq != previous.neighbor_range_sq
            || self.cohesion_strength != previous.cohesion_strength
            || self.separation_strength != previous.separation_strength
            || self.align_strength != previous.align_strength
            || self.bound_start != previous.bound_start
            || self.bound_radius != previous.bound_radius
            || self.bound_strength != previous.bound_strength
            || self.bounding_blend != previous.bounding_blend;

        let spawn_only = self.agents_per_axis != previous.agents_per_axis
            || self.flock_count != previous.flock_count
            || self.spawn != previous.spawn;

        ParamChanges { steering, spawn_only }
    }
}
