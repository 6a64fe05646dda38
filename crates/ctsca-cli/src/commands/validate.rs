//! # ctsca-cli::commands::validate
//!
//! Implements the `validate` subcommand.

use crate::wiring::load_scenario;
use anyhow::Result;
use std::path::PathBuf;

pub fn exec(path: PathBuf) -> Result<()> {
    println!("Validating scenario: {:?}", path);
    let scenario = load_scenario(&path)?;
    scenario.validate().map_err(|e| anyhow::anyhow!(e))?;
    println!("Scenario '{}' is valid.", scenario.name);
    Ok(())
}
