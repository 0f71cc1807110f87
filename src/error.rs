/*
 * Error Module
 *
 * Errors surfaced by the simulation core. Rule application itself never fails;
 * these cover invalid input at the edges: construction, parameters, timesteps
 * and configuration files.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::boid::BoidId;
use crate::flock::FlockId;

pub type Result<T> = std::result::Result<T, FlockError>;

#[derive(Debug, Error)]
pub enum FlockError {
    /// A flock must hold at least one boid.
    #[error("a flock must contain at least one boid")]
    EmptyFlock,

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Timesteps must be finite and strictly positive.
    #[error("invalid timestep {0}: must be finite and greater than zero")]
    InvalidTimestep(f32),

    #[error("initial position {index} has a non-finite coordinate")]
    NonFinitePosition { index: usize },

    #[error("boid id {found} does not match its slot {expected}")]
    MismatchedBoidId { expected: BoidId, found: BoidId },

    #[error("no flock with id {0}")]
    UnknownFlock(FlockId),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FlockError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FlockError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
