//! # ctsca-cli::wiring
//!
//! Loads a scenario file and turns its declarative `TopologySpec` into a
//! concrete `GridAdapter`, the only place the CLI picks a lattice
//! implementation on the engine's behalf.

use ctsca_engine::prelude::*;
use rand::Rng;
use std::{fs, path::Path};

/// Parses a scenario file, dispatching on its extension the same way the
/// rest of the workspace does (`.yaml`/`.yml` or `.toml`). Every failure
/// mode surfaces as a `ConfigError` (§7), the same taxonomy engine
/// construction itself uses.
pub fn load_scenario(path: &Path) -> Result<Scenario, ConfigError> {
    let content = fs::read_to_string(path)?;
    let scenario: Scenario = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        other => {
            return Err(ConfigError::Validation {
                name: path.display().to_string(),
                message: format!("unsupported scenario file extension: {other:?}"),
            })
        }
    };
    Ok(scenario)
}

/// Builds the `GridAdapter` a scenario's `TopologySpec` describes.
pub fn build_grid(topology: &TopologySpec) -> Box<dyn GridAdapter> {
    match topology {
        TopologySpec::Raster { rows, cols, boundary } => {
            Box::new(RasterGrid::new(*rows, *cols, *boundary))
        }
        TopologySpec::Hex { rows, cols, oriented, boundary } => {
            Box::new(HexGrid::new(*rows, *cols, *oriented, *boundary))
        }
    }
}

/// Resolves the RNG seed to use: an explicit CLI override wins, then the
/// scenario's own `seed` field, then a freshly drawn seed as a last resort
/// (in which case the run is not reproducible unless the caller records it).
pub fn get_seed(opts_seed: Option<u64>, scenario_seed: Option<u64>) -> u64 {
    opts_seed
        .or(scenario_seed)
        .unwrap_or_else(|| rand::thread_rng().gen())
}
