//! # ctsca-engine::transitions
//!
//! The transition table: for each link state, the list of `(target_state,
//! rate, name)` outgoing transitions (§4.2). Rules are normalized to id form
//! once at construction, then bucketed into per-state rows so the hot path
//! (sampling the next event for a link) only ever indexes a small, contiguous
//! slice.

use crate::codec::LinkCodec;
use ctsca_types::{
    errors::ConfigError,
    id::LinkStateId,
    rules::{LinkStateRef, TransitionRuleSpec},
};

#[derive(Debug, Clone)]
struct OutgoingTransition {
    target: LinkStateId,
    rate: f64,
    #[allow(dead_code)]
    name: Option<String>,
}

/// Dense, per-link-state outgoing transition rows.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    n_link: u32,
    rows: Vec<Vec<OutgoingTransition>>,
}

impl TransitionTable {
    /// Normalizes `rules` against `codec` and buckets them by `from`.
    ///
    /// Rejects (as `ConfigError`): an empty rule list, a rule list mixing id
    /// and triple forms, an out-of-range state/orientation/link-state-id in
    /// any triple-form rule, and any non-positive rate.
    pub fn build(codec: &LinkCodec, rules: &[TransitionRuleSpec]) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleList);
        }

        let all_id = rules.iter().all(|r| r.from.is_id() && r.to.is_id());
        let all_triple = rules.iter().all(|r| !r.from.is_id() && !r.to.is_id());
        if !all_id && !all_triple {
            return Err(ConfigError::MixedRuleForms);
        }

        let n_link = codec.n_link();
        let mut rows: Vec<Vec<OutgoingTransition>> = vec![Vec::new(); n_link as usize];

        for rule in rules {
            if rule.rate <= 0.0 {
                return Err(ConfigError::NonPositiveRate(rule.rate));
            }
            let from_id = Self::resolve(codec, &rule.from)?;
            let to_id = Self::resolve(codec, &rule.to)?;
            if from_id >= n_link {
                return Err(ConfigError::LinkStateOutOfRange(from_id, n_link));
            }
            if to_id >= n_link {
                return Err(ConfigError::LinkStateOutOfRange(to_id, n_link));
            }
            rows[from_id as usize].push(OutgoingTransition {
                target: to_id,
                rate: rule.rate,
                name: rule.name.clone(),
            });
        }

        Ok(Self { n_link, rows })
    }

    fn resolve(codec: &LinkCodec, r: &LinkStateRef) -> Result<LinkStateId, ConfigError> {
        match r {
            LinkStateRef::Id(id) => Ok(*id),
            LinkStateRef::Triple(t) => {
                let n_cell = codec.n_cell();
                let n_orient = codec.n_orient();
                if t.from_state >= n_cell {
                    return Err(ConfigError::CellStateOutOfRange(t.from_state, n_cell));
                }
                if t.to_state >= n_cell {
                    return Err(ConfigError::CellStateOutOfRange(t.to_state, n_cell));
                }
                if t.orientation >= n_orient {
                    return Err(ConfigError::OrientationOutOfRange(t.orientation, n_orient));
                }
                codec
                    .encode(t.from_state as _, t.to_state as _, t.orientation as _)
                    .map_err(|_| ConfigError::LinkStateOutOfRange(0, codec.n_link()))
            }
        }
    }

    pub fn n_out(&self, link_state: LinkStateId) -> usize {
        self.rows[link_state as usize].len()
    }

    pub fn has_outgoing(&self, link_state: LinkStateId) -> bool {
        self.n_out(link_state) > 0
    }

    /// The rates of every outgoing transition from `link_state`, in rule
    /// order — the slot order the sampler in `rng::sample_next_transition`
    /// draws against.
    pub fn rates(&self, link_state: LinkStateId) -> Vec<f64> {
        self.rows[link_state as usize].iter().map(|t| t.rate).collect()
    }

    pub fn target(&self, link_state: LinkStateId, slot: usize) -> LinkStateId {
        self.rows[link_state as usize][slot].target
    }

    pub fn n_link(&self) -> u32 {
        self.n_link
    }
}
