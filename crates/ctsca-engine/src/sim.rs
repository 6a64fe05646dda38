//! # ctsca-engine::sim
//!
//! The `Simulation` struct: the main entry point and orchestrator of the
//! engine. It owns the master clock, the event queue, the per-link runtime
//! state, and the deterministic RNG. `run_until` is the Gillespie-style
//! main loop (§4.5); `apply_transition` is the single place cell states,
//! link states, and scheduled events are kept consistent with each other.

use crate::{
    codec::LinkCodec,
    grid::GridAdapter,
    queue::{EventQueue, ScheduledEvent},
    rng::{sample_next_transition, Recorder, RngDiscipline},
    transitions::TransitionTable,
};
use ctsca_types::{
    errors::{ConfigError, EngineError, GridContractError},
    id::{CellState, LinkId, LinkStateId, NodeId, NO_LINK},
    rules::{CellStateDict, TransitionRuleSpec},
    time::{SimTime, NEVER, SIM_EPOCH},
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// The main simulation controller. Owns the grid, the codec and transition
/// table derived from it, every link's runtime state, and the event queue.
pub struct Simulation {
    clock: SimTime,
    queue: EventQueue,
    grid: Box<dyn GridAdapter>,
    codec: LinkCodec,
    table: TransitionTable,
    cell_states: Vec<CellState>,
    link_states: Vec<LinkStateId>,
    /// The authoritative "next update time" per link (I1, I2): any popped
    /// heap entry whose time disagrees with this is stale and is discarded.
    next_update_time: Vec<SimTime>,
    rng: ChaCha20Rng,
    recorder: Recorder,
    transitions_applied: u64,
    stale_events_skipped: u64,
}

impl Simulation {
    /// Validates the grid contract and the rule list, derives link states
    /// from the initial cell states, and schedules the first event for
    /// every link with at least one outgoing transition. Everything that
    /// can fail, fails here — once `run_until` starts, the engine does not
    /// surface errors (§4.5, §7).
    pub fn new(
        grid: Box<dyn GridAdapter>,
        cell_states_dict: &CellStateDict,
        rules: &[TransitionRuleSpec],
        initial_cell_states: Vec<u32>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let n_cell = cell_states_dict.n_cell() as u32;
        if n_cell == 0 {
            return Err(ConfigError::CellStateOutOfRange(0, 0).into());
        }

        let n_orient = grid.orientation_count();
        if !(1..=3).contains(&n_orient) {
            return Err(ConfigError::InvalidOrientationCount(n_orient).into());
        }

        let codec = LinkCodec::new(n_cell, n_orient);

        let node_count = grid.node_count() as u32;
        for link in 0..grid.active_link_count() as LinkId {
            let (from, to, orient) = grid.link_endpoints(link);
            if orient as u32 >= n_orient {
                return Err(GridContractError::OrientationOutOfRange(orient as u32, link, n_orient).into());
            }
            if from >= node_count {
                return Err(GridContractError::EndpointOutOfRange(from, link, node_count).into());
            }
            if to >= node_count {
                return Err(GridContractError::EndpointOutOfRange(to, link, node_count).into());
            }
        }

        if initial_cell_states.len() != grid.node_count() {
            return Err(ConfigError::InitialStateLengthMismatch {
                expected: grid.node_count(),
                actual: initial_cell_states.len(),
            }
            .into());
        }
        for &s in &initial_cell_states {
            if s >= n_cell {
                return Err(ConfigError::CellStateOutOfRange(s, n_cell).into());
            }
        }

        let table = TransitionTable::build(&codec, rules)?;

        let cell_states: Vec<CellState> = initial_cell_states.iter().map(|&s| s as CellState).collect();

        let n_links = grid.active_link_count();
        let mut link_states = vec![0 as LinkStateId; n_links];
        let mut next_update_time = vec![NEVER; n_links];
        let mut queue = EventQueue::new();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut recorder = Recorder::new(seed);

        for link in 0..n_links as LinkId {
            let (from, to, orient) = grid.link_endpoints(link);
            let link_state = codec
                .encode(cell_states[from as usize], cell_states[to as usize], orient)
                .expect("grid contract validated above");
            link_states[link as usize] = link_state;

            if table.has_outgoing(link_state) {
                let rates = table.rates(link_state);
                let mut disc = RngDiscipline::new(&mut rng, &mut recorder, "initial_schedule");
                let (slot, dt) = sample_next_transition(&mut disc, &rates);
                let target = table.target(link_state, slot);
                queue.push(dt, ScheduledEvent { link, target_link_state: target });
                next_update_time[link as usize] = dt;
            }
        }

        Ok(Self {
            clock: SIM_EPOCH,
            queue,
            grid,
            codec,
            table,
            cell_states,
            link_states,
            next_update_time,
            rng,
            recorder,
            transitions_applied: 0,
            stale_events_skipped: 0,
        })
    }

    /// Runs the main loop until `until_time` is reached or the queue is
    /// exhausted, whichever comes first. Matches §4.5's reference pseudocode
    /// exactly: an event whose time would cross `until_time` is pushed back
    /// onto the queue rather than applied, so a later `run_until` call with
    /// a larger horizon resumes from the same point.
    pub fn run_until(&mut self, until_time: SimTime, mut observer: Option<&mut dyn FnMut(SimTime)>) {
        while self.clock < until_time {
            let queued = match self.queue.pop_min() {
                Some(q) => q,
                None => break,
            };
            if queued.time != self.next_update_time[queued.payload.link as usize] {
                self.stale_events_skipped += 1;
                tracing::debug!(link = queued.payload.link, time = queued.time, "stale event skipped");
                continue;
            }
            if queued.time >= until_time {
                self.queue.push(queued.time, queued.payload);
                break;
            }
            self.apply_transition(queued.time, queued.payload);
            self.clock = queued.time;
            self.transitions_applied += 1;
            if let Some(obs) = observer.as_deref_mut() {
                obs(self.clock);
            }
        }
    }

    /// Runs to completion: until the event queue is exhausted. Every link
    /// with no outgoing transitions from its current state contributes no
    /// event, so a simulation that reaches an absorbing configuration
    /// terminates on its own — this is normal completion, not an error.
    pub fn run(&mut self, observer: Option<&mut dyn FnMut(SimTime)>) {
        self.run_until(NEVER, observer);
    }

    fn apply_transition(&mut self, time: SimTime, event: ScheduledEvent) {
        let link = event.link;
        let (from_node, to_node, _orient) = self.grid.link_endpoints(link);
        let (new_from_state, new_to_state, _orient_sanity) = self
            .codec
            .decode(event.target_link_state)
            .expect("scheduled target link state was validated at construction");

        tracing::debug!(link, time, target_link_state = event.target_link_state, "applying transition");

        let changed_from = self.write_cell_state(from_node, new_from_state);
        let changed_to = self.write_cell_state(to_node, new_to_state);

        self.recompute_and_reschedule(link, time);

        if changed_from {
            self.cascade(from_node, link, time);
        }
        if changed_to {
            self.cascade(to_node, link, time);
        }
    }

    /// Writes `new_state` to `node` only if it is a core node (I4), and
    /// reports whether the stored state actually changed. Boundary nodes
    /// never get written, so their `changed` is always `false`.
    fn write_cell_state(&mut self, node: NodeId, new_state: CellState) -> bool {
        if !self.grid.is_core(node) {
            return false;
        }
        let slot = &mut self.cell_states[node as usize];
        if *slot == new_state {
            false
        } else {
            *slot = new_state;
            true
        }
    }

    /// Re-derives `link`'s state from its endpoints' *current* (possibly
    /// clamped) cell states and schedules its next event. Re-encoding from
    /// the committed states rather than trusting the sampled target
    /// directly is what keeps I3 true across boundary clamping without a
    /// separate branch for the boundary case (§4.5 step 4).
    fn recompute_and_reschedule(&mut self, link: LinkId, now: SimTime) {
        let (from_node, to_node, orient) = self.grid.link_endpoints(link);
        let from_state = self.cell_states[from_node as usize];
        let to_state = self.cell_states[to_node as usize];
        let link_state = self
            .codec
            .encode(from_state, to_state, orient)
            .expect("endpoint states and orientation were validated at construction");
        self.link_states[link as usize] = link_state;

        if self.table.has_outgoing(link_state) {
            let rates = self.table.rates(link_state);
            let mut disc = RngDiscipline::new(&mut self.rng, &mut self.recorder, "recompute_and_reschedule");
            let (slot, dt) = sample_next_transition(&mut disc, &rates);
            let target = self.table.target(link_state, slot);
            let when = now + dt;
            self.queue.push(when, ScheduledEvent { link, target_link_state: target });
            self.next_update_time[link as usize] = when;
        } else {
            self.next_update_time[link as usize] = NEVER;
        }
    }

    /// Recomputes and reschedules every active link incident to `node`
    /// other than `skip` (the link whose transition just fired). The
    /// incident list is cloned before mutating other simulation fields to
    /// keep the engine free of `unsafe` borrow workarounds.
    fn cascade(&mut self, node: NodeId, skip: LinkId, now: SimTime) {
        let incident = self.grid.incident_active_links(node).to_vec();
        tracing::trace!(node, ?incident, "cascading neighbor reschedule");
        for link in incident {
            if link == NO_LINK || link == skip {
                continue;
            }
            self.recompute_and_reschedule(link, now);
        }
    }

    pub fn now(&self) -> SimTime {
        self.clock
    }

    pub fn cell_states(&self) -> &[CellState] {
        &self.cell_states
    }

    pub fn link_states(&self) -> &[LinkStateId] {
        &self.link_states
    }

    pub fn grid(&self) -> &dyn GridAdapter {
        self.grid.as_ref()
    }

    pub fn codec(&self) -> &LinkCodec {
        &self.codec
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn transitions_applied(&self) -> u64 {
        self.transitions_applied
    }

    pub fn stale_events_skipped(&self) -> u64 {
        self.stale_events_skipped
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::raster::RasterGrid;
    use ctsca_types::rules::LinkStateRef;
    use ctsca_types::topology::BoundaryMode;

    fn dict(states: &[&str]) -> CellStateDict {
        CellStateDict { states: states.iter().map(|s| s.to_string()).collect() }
    }

    // Scenario 1 (spec §8.1): single rule on a 2x2 raster drives every
    // horizontal (0,1)/(1,0) link to (1,1).
    #[test]
    fn single_rule_drives_horizontal_links_to_state_one() {
        let grid = Box::new(RasterGrid::new(2, 2, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        let rules = vec![TransitionRuleSpec {
            from: LinkStateRef::Id(1),
            to: LinkStateRef::Id(3),
            rate: 1.0,
            name: None,
        }];
        let mut sim = Simulation::new(grid, &cells, &rules, vec![0, 1, 0, 1], 42).unwrap();
        sim.run_until(1000.0, None);

        for link in 0..sim.grid().active_link_count() as LinkId {
            let (from, to, orient) = sim.grid().link_endpoints(link);
            if orient == 0 {
                let f = sim.cell_states()[from as usize];
                let t = sim.cell_states()[to as usize];
                assert!(f == 1 && t == 1, "horizontal link {link} did not settle at (1,1): ({f},{t})");
            }
        }
    }

    // Scenario 3 (spec §8.3): a link state with no outgoing rule keeps its
    // sentinel `next_update_time` forever.
    #[test]
    fn link_with_no_outgoing_rule_keeps_sentinel() {
        let grid = Box::new(RasterGrid::new(2, 2, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        // Rule only fires out of link state encoding (0,1,0); every other
        // link state, including (1,0,*) and (0,0,*), has no outgoing rule.
        let rules = vec![TransitionRuleSpec {
            from: LinkStateRef::Id(1),
            to: LinkStateRef::Id(3),
            rate: 1.0,
            name: None,
        }];
        let sim = Simulation::new(grid, &cells, &rules, vec![0, 0, 0, 0], 1).unwrap();
        for link in 0..sim.grid().active_link_count() as LinkId {
            assert_eq!(sim.next_update_time[link as usize], NEVER);
        }
    }

    // Scenario 2 (spec §8.2): a fast-rate family reschedules a slower-rate
    // family's links often enough that some popped heap entries are stale.
    #[test]
    fn high_rate_neighbor_activity_produces_stale_events() {
        let grid = Box::new(RasterGrid::new(3, 3, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        // Link state 1 = (0,1,horizontal), 3 = (1,1,horizontal); 5 = (0,1,vertical),
        // 7 = (1,1,vertical) under the canonical encoding for N_cell=2, N_orient=2.
        let rules = vec![
            TransitionRuleSpec { from: LinkStateRef::Id(1), to: LinkStateRef::Id(3), rate: 1.0, name: None },
            TransitionRuleSpec { from: LinkStateRef::Id(5), to: LinkStateRef::Id(7), rate: 1000.0, name: None },
        ];
        let initial = vec![0, 1, 0, 1, 0, 1, 0, 1, 0];
        let mut sim = Simulation::new(grid, &cells, &rules, initial, 3).unwrap();
        sim.run_until(5.0, None);
        assert!(sim.stale_events_skipped() > 0, "expected at least one stale event under heavy cascading");
    }

    // Scenario 4 (spec §8.4): boundary cells never change state.
    #[test]
    fn boundary_cells_never_change() {
        let grid = Box::new(RasterGrid::new(4, 4, BoundaryMode::FrozenEdges));
        let cells = dict(&["water", "land"]);
        let rules = vec![TransitionRuleSpec {
            from: LinkStateRef::Id(1),
            to: LinkStateRef::Id(3),
            rate: 1.0,
            name: None,
        }];
        let initial = vec![0u32; 16];
        let mut sim = Simulation::new(grid, &cells, &rules, initial.clone(), 7).unwrap();
        sim.run_until(100.0, None);

        for node in 0..16u32 {
            if !sim.grid().is_core(node) {
                assert_eq!(sim.cell_states()[node as usize], initial[node as usize] as CellState);
            }
        }
        // P1: every link state is consistent with its endpoints.
        for link in 0..sim.grid().active_link_count() as LinkId {
            let (from, to, orient) = sim.grid().link_endpoints(link);
            let expected = sim
                .codec()
                .encode(sim.cell_states()[from as usize], sim.cell_states()[to as usize], orient)
                .unwrap();
            assert_eq!(sim.link_states()[link as usize], expected);
        }
    }

    // Scenario 5 (spec §8.5): identical seed and scenario produce identical
    // trajectories.
    #[test]
    fn determinism_same_seed_same_result() {
        let rules = vec![
            TransitionRuleSpec { from: LinkStateRef::Id(1), to: LinkStateRef::Id(3), rate: 1.0, name: None },
            TransitionRuleSpec { from: LinkStateRef::Id(2), to: LinkStateRef::Id(3), rate: 1.0, name: None },
        ];
        let cells = dict(&["water", "land"]);
        let initial: Vec<u32> = (0..100).map(|i| i % 2).collect();

        let run = || {
            let grid = Box::new(RasterGrid::new(10, 10, BoundaryMode::AllCore));
            let mut sim = Simulation::new(grid, &cells, &rules, initial.clone(), 42).unwrap();
            sim.run_until(50.0, None);
            sim.cell_states().to_vec()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn recorder_tallies_draws_at_each_call_site() {
        let grid = Box::new(RasterGrid::new(3, 3, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        let rules = vec![TransitionRuleSpec { from: LinkStateRef::Id(1), to: LinkStateRef::Id(3), rate: 1.0, name: None }];
        let initial = vec![0, 1, 0, 1, 0, 1, 0, 1, 0];
        let mut sim = Simulation::new(grid, &cells, &rules, initial, 11).unwrap();
        assert!(sim.recorder().draw_counts().get("initial_schedule").copied().unwrap_or(0) > 0);

        sim.run_until(50.0, None);
        assert!(sim.recorder().draw_counts().get("recompute_and_reschedule").copied().unwrap_or(0) > 0);
    }

    #[test]
    fn rejects_initial_state_length_mismatch() {
        let grid = Box::new(RasterGrid::new(2, 2, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        let rules = vec![TransitionRuleSpec { from: LinkStateRef::Id(1), to: LinkStateRef::Id(3), rate: 1.0, name: None }];
        assert!(Simulation::new(grid, &cells, &rules, vec![0, 1, 0], 1).is_err());
    }

    // §8's until_time policy decision: an event whose time would cross the
    // horizon is pushed back rather than applied, so `now()` never exceeds
    // `until_time`, and a later call with a larger horizon resumes cleanly
    // from exactly where the previous call stopped.
    #[test]
    fn run_until_never_crosses_the_horizon_and_resumes() {
        let grid = Box::new(RasterGrid::new(10, 10, BoundaryMode::AllCore));
        let cells = dict(&["water", "land"]);
        let rules = vec![
            TransitionRuleSpec { from: LinkStateRef::Id(1), to: LinkStateRef::Id(3), rate: 1.0, name: None },
            TransitionRuleSpec { from: LinkStateRef::Id(2), to: LinkStateRef::Id(3), rate: 1.0, name: None },
        ];
        let initial: Vec<u32> = (0..100).map(|i| i % 2).collect();
        let mut sim = Simulation::new(grid, &cells, &rules, initial, 99).unwrap();

        sim.run_until(5.0, None);
        assert!(sim.now() < 5.0);

        sim.run_until(10.0, None);
        assert!(sim.now() < 10.0);

        let grid2 = Box::new(RasterGrid::new(10, 10, BoundaryMode::AllCore));
        let initial2: Vec<u32> = (0..100).map(|i| i % 2).collect();
        let mut sim2 = Simulation::new(grid2, &cells, &rules, initial2, 99).unwrap();
        sim2.run_until(10.0, None);

        // Running in two chunks to 10.0 matches running straight to 10.0.
        assert_eq!(sim.cell_states(), sim2.cell_states());
    }
}
