//! # ctsca-cli
//!
//! The main entry point for the `ctsca` binary. It parses command-line
//! arguments and dispatches to the appropriate subcommand handler.

#![forbid(unsafe_code)]

use crate::args::{Cli, Command};
use anyhow::Result;
use clap::Parser;

mod args;
mod commands;
mod logging;
mod wiring;

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.log);

    match args.command {
        Command::Run(opts) => commands::run::exec(opts),
        Command::Validate { scenario } => commands::validate::exec(scenario),
        Command::Describe { scenario } => commands::describe::exec(scenario),
    }
}
