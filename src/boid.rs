/*
 * Boid Module
 *
 * This module defines the Boid struct and its steering behavior.
 * Each tick a boid applies four rules to its heading, in this order:
 * 1. Cohesion: Steer towards the flock's average position
 * 2. Separation: Steer away from any boid (in any flock) that is too close
 * 3. Alignment: Steer towards the flock's average heading
 * 4. Bounding: Steer back towards the bounding center once too far out
 *
 * Every rule adds a weighted vector to the heading and renormalizes it.
 */

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::flock::FlockId;
use crate::math::{inverse_lerp_clamped, lerp_clamped, normalize_or_zero, saturating_weight};
use crate::params::BoundingBlend;

/// Stable handle for a boid: the owning flock and the boid's slot in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoidId {
    pub flock: FlockId,
    pub index: u32,
}

impl fmt::Display for BoidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.flock, self.index)
    }
}

/// Bounding-rule inputs, copied out of the parameters once per tick.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub center: Vec3,
    pub start: f32,
    pub radius: f32,
    pub strength: f32,
    pub blend: BoundingBlend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boid {
    id: BoidId,
    pub position: Vec3,
    pub direction: Vec3,
    /// Orientation handed to the host. Lags `direction` only when that is zero.
    pub facing: Vec3,
}

impl Boid {
    pub fn new(id: BoidId, position: Vec3) -> Self {
        Self {
            id,
            position,
            direction: Vec3::ZERO,
            facing: Vec3::Z,
        }
    }

    pub fn id(&self) -> BoidId {
        self.id
    }

    // Add a steering contribution and renormalize the heading
    fn steer(&mut self, contribution: Vec3) {
        self.direction = normalize_or_zero(self.direction + contribution);
    }

    /// Steer towards the flock's average position.
    ///
    /// `average_position` is the flock aggregate, which is itself normalized,
    /// so this pulls towards a point on the unit sphere around the origin.
    pub fn apply_cohesion(&mut self, average_position: Vec3, strength: f32) {
        let cohesion_direction = normalize_or_zero(average_position - self.position);
        self.steer(cohesion_direction * saturating_weight(strength));
    }

    /// Steer away from every other boid closer than `sqrt(range_sq)`.
    ///
    /// `others` is the frozen pre-tick snapshot of all boids in all flocks.
    /// Returns how many neighbors were inside the range.
    pub fn apply_separation(&mut self, others: &[(BoidId, Vec3)], range_sq: f32, strength: f32) -> usize {
        let mut separation_direction = Vec3::ZERO;
        let mut neighbors = 0;

        for &(other_id, other_position) in others {
            if other_id == self.id {
                continue;
            }

            if (other_position - self.position).length_squared() < range_sq {
                separation_direction += self.position - other_position;
                neighbors += 1;
            }
        }

        self.steer(separation_direction * saturating_weight(strength));
        neighbors
    }

    /// Steer towards the flock's average heading.
    pub fn apply_alignment(&mut self, average_direction: Vec3, strength: f32) {
        self.steer(average_direction * saturating_weight(strength));
    }

    /// Pull back towards the bounding center once past `bounds.start`.
    ///
    /// Inside the free-roam zone the heading is left untouched. Returns
    /// whether the rule applied.
    pub fn apply_bounding(&mut self, bounds: &Bounds) -> bool {
        let offset = bounds.center - self.position;
        let center_direction = normalize_or_zero(offset);
        let distance = offset.length();
        if distance < bounds.start {
            return false;
        }

        let blend = match bounds.blend {
            // Raw distance goes straight into a clamped lerp
            BoundingBlend::RawDistance => lerp_clamped(bounds.start, bounds.radius, distance),
            BoundingBlend::Normalized => inverse_lerp_clamped(bounds.start, bounds.radius, distance),
        };

        self.steer(center_direction * (bounds.strength * blend / (bounds.strength + 1.0)));
        true
    }

    /// Move along the heading and turn the facing to match it.
    pub fn integrate(&mut self, speed: f32, dt: f32) {
        self.position += self.direction * (speed * dt);

        // A zero heading has no orientation, so keep the last facing
        if self.direction != Vec3::ZERO {
            self.facing = self.direction;
        }
    }
}
