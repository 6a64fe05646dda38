//! # ctsca-cli::commands
//!
//! One module per subcommand.

pub mod describe;
pub mod run;
pub mod validate;
