//! # ctsca-types::topology
//!
//! Declarative specification of the lattice a scenario runs on. `ctsca-engine`
//! turns a `TopologySpec` into a concrete `GridAdapter` implementation;
//! this crate only carries the serializable description.

use serde::{Deserialize, Serialize};

/// How a grid adapter decides which nodes are core (mutable) versus boundary
/// (frozen at their initial state, per I4).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// The outermost ring of nodes is non-core; everything else is core.
    FrozenEdges,
    /// Every node is core.
    AllCore,
}

/// The lattice a scenario runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologySpec {
    /// An axis-aligned rectangular grid. `N_orient = 2` (0 = horizontal,
    /// 1 = vertical links).
    Raster {
        rows: usize,
        cols: usize,
        #[serde(default = "default_boundary")]
        boundary: BoundaryMode,
    },
    /// An offset-coordinate hexagonal grid. `N_orient = 3` if `oriented`,
    /// else 1.
    Hex {
        rows: usize,
        cols: usize,
        #[serde(default)]
        oriented: bool,
        #[serde(default = "default_boundary")]
        boundary: BoundaryMode,
    },
}

fn default_boundary() -> BoundaryMode {
    BoundaryMode::FrozenEdges
}

impl TopologySpec {
    /// The orientation count implied by this topology, matching §3's
    /// `N_orient ∈ {1, 2, 3}`.
    pub fn n_orient(&self) -> u32 {
        match self {
            TopologySpec::Raster { .. } => 2,
            TopologySpec::Hex { oriented, .. } => {
                if *oriented {
                    3
                } else {
                    1
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            TopologySpec::Raster { rows, cols, .. } => rows * cols,
            TopologySpec::Hex { rows, cols, .. } => rows * cols,
        }
    }
}
