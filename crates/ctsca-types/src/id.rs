//! # ctsca-types::id
//!
//! Defines the core identifier types used throughout the simulation.
//! Using distinct types for different kinds of IDs helps prevent bugs where,
//! for example, a `LinkId` might be accidentally used as a link-state id.

/// A unique identifier for a node (cell) in the lattice.
/// Invariant: nodes supplied by a grid adapter MUST have contiguous IDs
/// from 0 to `node_count() - 1`.
pub type NodeId = u32;

/// A unique identifier for an active link between two nodes. Links are
/// indexed contiguously from 0 to `active_link_count() - 1` by the grid
/// adapter; this id doubles as the index into all per-link runtime arrays.
pub type LinkId = u32;

/// A discrete cell state, in `[0, N_cell)`.
pub type CellState = u16;

/// An orientation code, in `[0, N_orient)`.
pub type Orientation = u8;

/// A dense link-state id, in `[0, N_link)` where `N_link = N_orient * N_cell^2`.
pub type LinkStateId = u32;

/// The sentinel value the grid adapter may use in a fixed-width incident-link
/// layout to mark "no link in this slot". Engines must skip it.
pub const NO_LINK: LinkId = LinkId::MAX;
