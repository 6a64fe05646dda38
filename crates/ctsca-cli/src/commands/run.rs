//! # ctsca-cli::commands::run
//!
//! Implements the `run` subcommand.

use crate::{
    args::RunOpts,
    wiring::{build_grid, get_seed, load_scenario},
};
use anyhow::Result;
use ctsca_engine::prelude::*;
use std::collections::BTreeMap;

pub fn exec(opts: RunOpts) -> Result<()> {
    let scenario = load_scenario(&opts.scenario)?;
    scenario.validate().map_err(|e| anyhow::anyhow!(e))?;

    let seed = get_seed(opts.seed, scenario.seed);
    println!("Running scenario '{}' with seed: {}", scenario.name, seed);

    let grid = build_grid(&scenario.topology);
    let mut sim = Simulation::new(
        grid,
        &scenario.cell_states,
        &scenario.transitions,
        scenario.initial_cell_states.clone(),
        seed,
    )?;

    let stop_at = opts.stop_at.or(scenario.stop_at);

    let mut progress = |t: SimTime| {
        if !opts.quiet {
            tracing::info!(sim_time = t, "transition applied");
        }
    };
    let observer: Option<&mut dyn FnMut(SimTime)> = if opts.quiet { None } else { Some(&mut progress) };

    match stop_at {
        Some(until) => sim.run_until(until, observer),
        None => sim.run(observer),
    }

    println!("{}", "=".repeat(60));
    println!("Simulation finished at t = {:.6}", sim.now());
    println!("Transitions applied:    {}", sim.transitions_applied());
    println!("Stale events skipped:   {}", sim.stale_events_skipped());

    let mut histogram: BTreeMap<u32, usize> = BTreeMap::new();
    for &state in sim.cell_states() {
        *histogram.entry(state as u32).or_insert(0) += 1;
    }
    println!("\nFinal cell-state histogram:");
    for (state, count) in histogram {
        let name = scenario.cell_states.name_of(state).unwrap_or("?");
        println!("  {name} ({state}): {count}");
    }

    Ok(())
}
