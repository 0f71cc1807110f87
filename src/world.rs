/*
 * World Module
 *
 * The simulation controller. A World owns every flock, the parameters and the
 * bounding center, and advances them one tick at a time. Hosts drive it by
 * calling `advance_tick` with their frame delta and then reading boid
 * positions and facings back out.
 */

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::boid::{Boid, BoidId};
use crate::debug::TickStats;
use crate::error::{FlockError, Result};
use crate::flock::{Flock, FlockId};
use crate::math::is_finite_vec;
use crate::params::SimulationParams;
use crate::physics::update_flocks;

#[derive(Debug, Clone)]
pub struct World {
    flocks: Vec<Flock>,
    params: SimulationParams,
    bounding_center: Vec3,
    tick: u64,
}

impl World {
    /// An empty world; add flocks with `create_flock`.
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            flocks: Vec::new(),
            params,
            bounding_center: Vec3::ZERO,
            tick: 0,
        })
    }

    /// A world with `flock_count` flocks placed by the configured spawn pattern.
    pub fn spawn(params: SimulationParams) -> Result<Self> {
        params.validate_for_spawn()?;

        let mut world = Self::new(params)?;
        for i in 0..world.params.flock_count {
            let positions = world.params.spawn.positions(i, world.params.agents_per_axis);
            world.create_flock(positions)?;
        }

        info!(
            flocks = world.flocks.len(),
            per_flock = world.params.agents_per_flock(),
            boids = world.agent_count(),
            spawn = ?world.params.spawn,
            "Spawned flocks"
        );
        Ok(world)
    }

    /// Add a flock with one zero-heading boid per position.
    pub fn create_flock(&mut self, positions: impl IntoIterator<Item = Vec3>) -> Result<FlockId> {
        let id = FlockId(self.flocks.len() as u32);
        let flock = Flock::new(id, positions)?;
        debug!(flock = %id, boids = flock.len(), "Created flock");
        self.flocks.push(flock);
        Ok(id)
    }

    /// Run one full update pass over every flock.
    ///
    /// Rejects a non-finite or non-positive `dt` without touching any state.
    pub fn advance_tick(&mut self, dt: f32) -> Result<TickStats> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FlockError::InvalidTimestep(dt));
        }

        let mut stats = update_flocks(&mut self.flocks, &self.params, self.bounding_center, dt);
        self.tick += 1;
        stats.tick = self.tick;

        debug!(
            tick = stats.tick,
            boids = stats.boids,
            neighbor_hits = stats.neighbor_hits,
            bounded = stats.bounded_boids,
            degenerate = stats.degenerate_directions,
            micros = stats.duration.as_micros() as u64,
            "Advanced tick"
        );
        Ok(stats)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Replace the parameters; the next tick uses the new values.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<()> {
        params.validate()?;

        let changes = params.detect_changes(&self.params);
        if !changes.any() {
            return Ok(());
        }
        if changes.spawn_only {
            warn!("Spawn parameters changed on a running world; they only apply to newly spawned worlds");
        }
        if changes.steering {
            debug!(tick = self.tick, "Steering parameters updated");
        }

        self.params = params;
        Ok(())
    }

    pub fn bounding_center(&self) -> Vec3 {
        self.bounding_center
    }

    pub fn set_bounding_center(&mut self, center: Vec3) -> Result<()> {
        if !is_finite_vec(center) {
            return Err(FlockError::invalid("bounding_center", format!("{center} is not finite")));
        }
        self.bounding_center = center;
        Ok(())
    }

    /// Number of ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn flocks(&self) -> &[Flock] {
        &self.flocks
    }

    pub fn flock(&self, id: FlockId) -> Result<&Flock> {
        self.flocks
            .get(id.0 as usize)
            .ok_or(FlockError::UnknownFlock(id))
    }

    pub fn agent_count(&self) -> usize {
        self.flocks.iter().map(Flock::len).sum()
    }

    /// Every boid across every flock, in flock order.
    pub fn boids(&self) -> impl Iterator<Item = &Boid> + '_ {
        self.flocks.iter().flat_map(|flock| flock.boids().iter())
    }

    pub fn boid(&self, id: BoidId) -> Option<&Boid> {
        self.flocks
            .get(id.flock.0 as usize)
            .and_then(|flock| flock.boid(id.index as usize))
    }

    /// Mutable access for hosts that move boids between ticks.
    pub fn boid_mut(&mut self, id: BoidId) -> Option<&mut Boid> {
        self.flocks
            .get_mut(id.flock.0 as usize)
            .and_then(|flock| flock.boid_mut(id.index as usize))
    }
}
