//! # ctsca-types::rules
//!
//! The scenario-facing schema for transition rules and the cell-state name
//! dictionary. These are plain serde DTOs; normalizing a `TransitionRuleSpec`
//! list into a dense transition table is `ctsca-engine`'s job.

use serde::{Deserialize, Serialize};

/// A cell-state triple `(from_state, to_state, orientation)`, as a user
/// would write it when a rule is given in triple form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkTriple {
    pub from_state: u32,
    pub to_state: u32,
    pub orientation: u32,
}

/// One side of a transition rule: either a dense link-state id, or the
/// triple it would encode to. A rule list must use exactly one form
/// throughout; mixing is rejected at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkStateRef {
    Id(u32),
    Triple(LinkTriple),
}

impl LinkStateRef {
    pub fn is_id(&self) -> bool {
        matches!(self, LinkStateRef::Id(_))
    }
}

/// A single user-supplied transition rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRuleSpec {
    pub from: LinkStateRef,
    pub to: LinkStateRef,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A display-name dictionary for cell states, used for diagnostics only.
/// `states[i]` is the name of cell state `i`; `N_cell = states.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CellStateDict {
    pub states: Vec<String>,
}

impl CellStateDict {
    pub fn n_cell(&self) -> usize {
        self.states.len()
    }

    pub fn name_of(&self, state: u32) -> Option<&str> {
        self.states.get(state as usize).map(String::as_str)
    }
}
