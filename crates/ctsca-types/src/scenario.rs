//! # ctsca-types::scenario
//!
//! Defines the Rust structs that map directly to the scenario DSL (YAML/TOML).
//! This is the authoritative schema for defining a CTS-CA run.

use crate::{
    rules::{CellStateDict, TransitionRuleSpec},
    time::{deserialize_optional_sim_time, SimTime},
    topology::TopologySpec,
};
use serde::{Deserialize, Serialize};

/// The top-level structure for a scenario definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub seed: Option<u64>,
    pub cell_states: CellStateDict,
    pub topology: TopologySpec,
    pub initial_cell_states: Vec<u32>,
    pub transitions: Vec<TransitionRuleSpec>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_sim_time"
    )]
    pub stop_at: Option<SimTime>,
}

impl Scenario {
    /// Validates the scenario for structural consistency that doesn't
    /// require building the grid or transition table: enough to reject
    /// obviously malformed input before the more expensive engine
    /// construction is attempted.
    pub fn validate(&self) -> Result<(), String> {
        let n_cell = self.cell_states.n_cell();
        if n_cell == 0 {
            return Err("cell_states must name at least one cell state".to_string());
        }

        let (rows, cols) = match &self.topology {
            TopologySpec::Raster { rows, cols, .. } => (*rows, *cols),
            TopologySpec::Hex { rows, cols, .. } => (*rows, *cols),
        };
        if rows == 0 || cols == 0 {
            return Err(format!(
                "topology must have at least one row and one column, got {rows}x{cols}"
            ));
        }

        let expected_nodes = self.topology.node_count();
        if self.initial_cell_states.len() != expected_nodes {
            return Err(format!(
                "initial_cell_states has {} entries, but the topology has {} nodes",
                self.initial_cell_states.len(),
                expected_nodes
            ));
        }
        for (i, &s) in self.initial_cell_states.iter().enumerate() {
            if s as usize >= n_cell {
                return Err(format!(
                    "initial_cell_states[{i}] = {s}, but only {n_cell} cell states are defined"
                ));
            }
        }

        if self.transitions.is_empty() {
            return Err("transitions must contain at least one rule".to_string());
        }
        let all_id = self.transitions.iter().all(|r| r.from.is_id() && r.to.is_id());
        let all_triple = self
            .transitions
            .iter()
            .all(|r| !r.from.is_id() && !r.to.is_id());
        if !all_id && !all_triple {
            return Err(
                "transitions must use exactly one of id form or triple form, not a mix"
                    .to_string(),
            );
        }
        for (i, rule) in self.transitions.iter().enumerate() {
            if rule.rate <= 0.0 {
                return Err(format!("transitions[{i}].rate must be positive, got {}", rule.rate));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LinkStateRef;
    use crate::topology::BoundaryMode;

    fn base_scenario() -> Scenario {
        Scenario {
            name: "test".to_string(),
            seed: Some(42),
            cell_states: CellStateDict {
                states: vec!["water".to_string(), "land".to_string()],
            },
            topology: TopologySpec::Raster {
                rows: 2,
                cols: 2,
                boundary: BoundaryMode::AllCore,
            },
            initial_cell_states: vec![0, 1, 0, 1],
            transitions: vec![TransitionRuleSpec {
                from: LinkStateRef::Id(1),
                to: LinkStateRef::Id(3),
                rate: 1.0,
                name: None,
            }],
            stop_at: Some(1000.0),
        }
    }

    #[test]
    fn accepts_well_formed_scenario() {
        assert!(base_scenario().validate().is_ok());
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut s = base_scenario();
        s.initial_cell_states.pop();
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_mixed_rule_forms() {
        let mut s = base_scenario();
        s.transitions.push(TransitionRuleSpec {
            from: LinkStateRef::Triple(crate::rules::LinkTriple {
                from_state: 0,
                to_state: 1,
                orientation: 0,
            }),
            to: LinkStateRef::Id(3),
            rate: 1.0,
            name: None,
        });
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_rate() {
        let mut s = base_scenario();
        s.transitions[0].rate = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_zero_dimension_topology() {
        let mut s = base_scenario();
        s.topology = TopologySpec::Raster { rows: 0, cols: 2, boundary: BoundaryMode::AllCore };
        s.initial_cell_states = vec![];
        assert!(s.validate().is_err());
    }
}
