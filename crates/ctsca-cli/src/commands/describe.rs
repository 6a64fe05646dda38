//! # ctsca-cli::commands::describe
//!
//! Implements the `describe` subcommand: prints the derived codec/table
//! shape for a scenario without running it — the diagnostic/observation
//! surface called for alongside the run-time accessors.

use crate::wiring::{build_grid, load_scenario};
use anyhow::Result;
use ctsca_engine::prelude::*;
use std::path::PathBuf;

pub fn exec(path: PathBuf) -> Result<()> {
    let scenario = load_scenario(&path)?;
    scenario.validate().map_err(|e| anyhow::anyhow!(e))?;

    let grid = build_grid(&scenario.topology);
    let n_cell = scenario.cell_states.n_cell() as u32;
    let n_orient = grid.orientation_count();
    let codec = LinkCodec::new(n_cell, n_orient);
    let table = TransitionTable::build(&codec, &scenario.transitions)?;

    println!("scenario:        {}", scenario.name);
    println!("N_cell:          {}", codec.n_cell());
    println!("N_orient:        {}", codec.n_orient());
    println!("N_link:          {}", codec.n_link());
    println!("nodes:           {}", grid.node_count());
    println!("active links:    {}", grid.active_link_count());
    println!();
    println!("outgoing transitions per link state:");
    for id in 0..table.n_link() {
        let n_out = table.n_out(id);
        if n_out > 0 {
            let (f, t, o) = codec.decode(id)?;
            println!("  link state {id:>4} = ({f}, {t}, {o}): {n_out} outgoing transition(s)");
        }
    }

    Ok(())
}
