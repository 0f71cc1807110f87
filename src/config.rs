/*
 * Config Module
 *
 * Loads SimulationParams from a JSON file. Missing fields fall back to the
 * defaults, so a config only needs the values it changes.
 */

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{FlockError, Result};
use crate::params::SimulationParams;

pub fn load_params(path: impl AsRef<Path>) -> Result<SimulationParams> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FlockError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let params = parse_params(&text).map_err(|source| FlockError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    params.validate()?;

    info!(path = %path.display(), "Loaded simulation parameters");
    Ok(params)
}

pub fn parse_params(text: &str) -> std::result::Result<SimulationParams, serde_json::Error> {
    serde_json::from_str(text)
}
