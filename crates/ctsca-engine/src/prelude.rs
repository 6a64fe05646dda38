//! # ctsca-engine::prelude
//!
//! A convenience module that re-exports the most commonly used types from
//! the engine and `ctsca-types`, for crates (like `ctsca-cli`) that depend
//! on the engine.

pub use crate::{
    codec::LinkCodec,
    grid::{hex::HexGrid, raster::RasterGrid, GridAdapter},
    queue::{EventQueue, Queued, ScheduledEvent},
    rng::{Recorder, RngDiscipline},
    sim::Simulation,
    transitions::TransitionTable,
};

pub use ctsca_types::{
    self,
    errors::*,
    id::*,
    rules::*,
    scenario::*,
    time::*,
    topology::*,
};
