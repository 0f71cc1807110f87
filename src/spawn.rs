/*
 * Spawn Module
 *
 * Initial placement for spawned flocks. Flock `i` is centred around the
 * offset (i, i, i). The lattice layout fills a cube of integer points; the
 * scatter layout draws the same number of points from a seeded RNG so runs
 * stay reproducible.
 */

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};

/// Largest spawn cube side; keeps `agents_per_axis³` and boid indices within `u32`.
pub const MAX_AGENTS_PER_AXIS: u32 = 1024;

/// Number of boids in an `agents_per_axis` cube.
pub fn cube_count(agents_per_axis: u32) -> usize {
    let side = agents_per_axis as usize;
    side.saturating_mul(side).saturating_mul(side)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPattern {
    /// One boid per integer point of an `n x n x n` cube.
    #[default]
    Lattice,
    /// Uniform random points in a cube of half-extent `radius`.
    Scatter { radius: f32, seed: u64 },
}

impl SpawnPattern {
    pub fn validate(&self) -> Result<()> {
        match *self {
            SpawnPattern::Lattice => Ok(()),
            SpawnPattern::Scatter { radius, .. } => {
                if radius.is_finite() && radius >= 0.0 {
                    Ok(())
                } else {
                    Err(FlockError::invalid(
                        "spawn.radius",
                        format!("{radius} must be finite and non-negative"),
                    ))
                }
            }
        }
    }

    /// Positions for the flock at `flock_index`, `agents_per_axis³` of them.
    pub fn positions(&self, flock_index: u32, agents_per_axis: u32) -> Vec<Vec3> {
        let offset = Vec3::ONE * flock_index as f32;
        match *self {
            SpawnPattern::Lattice => lattice_positions(agents_per_axis, offset),
            SpawnPattern::Scatter { radius, seed } => {
                // Mix the flock index into the seed so flocks don't overlap exactly
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(flock_index)));
                scatter_positions(&mut rng, cube_count(agents_per_axis), radius, offset)
            }
        }
    }
}

/// Integer lattice points `(x, y, z) + offset`, x outermost and z innermost.
pub fn lattice_positions(agents_per_axis: u32, offset: Vec3) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(cube_count(agents_per_axis));

    for x in 0..agents_per_axis {
        for y in 0..agents_per_axis {
            for z in 0..agents_per_axis {
                positions.push(Vec3::new(x as f32, y as f32, z as f32) + offset);
            }
        }
    }

    positions
}

pub fn scatter_positions<R: Rng>(rng: &mut R, count: usize, radius: f32, offset: Vec3) -> Vec<Vec3> {
    if radius <= 0.0 || !radius.is_finite() {
        return vec![offset; count];
    }

    (0..count)
        .map(|_| {
            let x = rng.gen_range(-radius..radius);
            let y = rng.gen_range(-radius..radius);
            let z = rng.gen_range(-radius..radius);
            Vec3::new(x, y, z) + offset
        })
        .collect()
}
