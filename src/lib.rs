/*
 * Flock Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation core.
 * A World owns flocks of boids and advances them tick by tick; hosts supply
 * the timestep and read positions back out.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidId, Bounds};
pub use debug::TickStats;
pub use error::{FlockError, Result};
pub use flock::{Flock, FlockId};
pub use params::{BoundingBlend, ParamChanges, SimulationParams};
pub use spawn::SpawnPattern;
pub use world::World;

// Define modules
pub mod boid;
pub mod config;
pub mod debug;
pub mod error;
pub mod flock;
pub mod math;
pub mod params;
pub mod physics;
pub mod spawn;
pub mod world;

// Timestep the host driver uses when none is given
pub const DEFAULT_DT: f32 = 1.0 / 60.0;
