//! # ctsca-engine::grid
//!
//! The grid adapter contract (§4.6): the engine's only view onto lattice
//! geometry. Lattice construction, coordinates, and anything beyond this
//! read-only surface are the adapter's concern, not the engine's.

pub mod hex;
pub mod raster;

use ctsca_types::id::{LinkId, NodeId, Orientation};

/// Read-only topology the simulation engine consumes. Implementations own
/// their own node/link numbering; the engine only requires that link ids be
/// dense and contiguous in `0..active_link_count()`.
pub trait GridAdapter {
    fn node_count(&self) -> usize;

    fn active_link_count(&self) -> usize;

    /// `(from_node, to_node, orientation)` for an active link.
    fn link_endpoints(&self, link: LinkId) -> (NodeId, NodeId, Orientation);

    /// Whether the engine is permitted to mutate this node's state (I4).
    fn is_core(&self, node: NodeId) -> bool;

    /// The active links incident to `node`, in the adapter's own order.
    /// Fixed-width adapters may pad with `ctsca_types::id::NO_LINK`; the
    /// engine skips that sentinel.
    fn incident_active_links(&self, node: NodeId) -> &[LinkId];

    /// `N_orient` for this lattice variant: 1 for a non-oriented hex grid,
    /// 2 for an axis-aligned raster, 3 for an oriented hex grid.
    fn orientation_count(&self) -> u32;
}
