/*
 * Flock Module
 *
 * A flock is a fixed, non-empty group of boids sharing two aggregates that
 * the cohesion and alignment rules read: the normalized average position and
 * the normalized average heading. Both are recomputed from pre-tick state at
 * the start of every tick.
 */

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::boid::{Boid, BoidId};
use crate::error::{FlockError, Result};
use crate::math::{is_finite_vec, normalize_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlockId(pub u32);

impl fmt::Display for FlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flock#{}", self.0)
    }
}

// Deserialized flocks go through the same checks as `Flock::new`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FlockState")]
pub struct Flock {
    id: FlockId,
    boids: Vec<Boid>,
    average_position: Vec3,
    average_direction: Vec3,
}

impl Flock {
    /// Create a flock with one boid per position, all with a zero heading.
    pub fn new(id: FlockId, positions: impl IntoIterator<Item = Vec3>) -> Result<Self> {
        let mut boids = Vec::new();
        for (index, position) in positions.into_iter().enumerate() {
            if !is_finite_vec(position) {
                return Err(FlockError::NonFinitePosition { index });
            }
            let boid_id = BoidId {
                flock: id,
                index: index as u32,
            };
            boids.push(Boid::new(boid_id, position));
        }

        if boids.is_empty() {
            return Err(FlockError::EmptyFlock);
        }

        let mut flock = Self {
            id,
            boids,
            average_position: Vec3::ZERO,
            average_direction: Vec3::ZERO,
        };
        flock.update_aggregates();
        Ok(flock)
    }

    pub fn id(&self) -> FlockId {
        self.id
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub(crate) fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn boid(&self, index: usize) -> Option<&Boid> {
        self.boids.get(index)
    }

    pub fn boid_mut(&mut self, index: usize) -> Option<&mut Boid> {
        self.boids.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    /// Never true for a constructed flock.
    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Normalized mean position: a direction from the origin, not the centroid.
    pub fn average_position(&self) -> Vec3 {
        self.average_position
    }

    /// Normalized mean of the members' normalized headings.
    pub fn average_direction(&self) -> Vec3 {
        self.average_direction
    }

    /// Un-normalized mean position, computed on demand.
    pub fn centroid(&self) -> Vec3 {
        self.position_sum() / self.boids.len() as f32
    }

    fn position_sum(&self) -> Vec3 {
        self.boids.iter().map(|boid| boid.position).sum()
    }

    pub fn compute_average_position(&mut self) {
        let mean = self.position_sum() / self.boids.len() as f32;
        self.average_position = normalize_or_zero(mean);
    }

    pub fn compute_average_direction(&mut self) {
        let total: Vec3 = self
            .boids
            .iter()
            .map(|boid| normalize_or_zero(boid.direction))
            .sum();
        self.average_direction = normalize_or_zero(total / self.boids.len() as f32);
    }

    /// Recompute both aggregates from the current boid state.
    pub fn update_aggregates(&mut self) {
        self.compute_average_position();
        self.compute_average_direction();
    }
}

/// Serialized form of a flock as written by `--dump`; aggregates are recomputed.
#[derive(Debug, Deserialize)]
struct FlockState {
    id: FlockId,
    boids: Vec<BoidState>,
}

#[derive(Debug, Deserialize)]
struct BoidState {
    id: BoidId,
    position: Vec3,
    direction: Vec3,
    facing: Vec3,
}

impl TryFrom<FlockState> for Flock {
    type Error = FlockError;

    fn try_from(state: FlockState) -> Result<Self> {
        for (index, boid) in state.boids.iter().enumerate() {
            let expected = BoidId {
                flock: state.id,
                index: index as u32,
            };
            if boid.id != expected {
                return Err(FlockError::MismatchedBoidId {
                    expected,
                    found: boid.id,
                });
            }
            if !is_finite_vec(boid.direction) || !is_finite_vec(boid.facing) {
                return Err(FlockError::NonFinitePosition { index });
            }
        }

        let mut flock = Flock::new(state.id, state.boids.iter().map(|boid| boid.position))?;
        for (boid, saved) in flock.boids.iter_mut().zip(&state.boids) {
            boid.direction = saved.direction;
            boid.facing = saved.facing;
        }
        flock.update_aggregates();
        Ok(flock)
    }
}
