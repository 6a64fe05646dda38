//! # ctsca-engine::rng
//!
//! Defines the discipline for using the master Random Number Generator.
//! The `RngDiscipline` wrapper ensures that every use of the RNG is
//! associated with a site label and recorded for auditing, and carries the
//! exponential-waiting-time sampling the Gillespie step needs (§4.4).

use ctsca_types::time::SimTime;
use rand::RngCore;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Exp};
use std::collections::BTreeMap;

/// A wrapper around the master RNG to enforce recording of its usage.
pub struct RngDiscipline<'a> {
    rng: &'a mut ChaCha20Rng,
    recorder: &'a mut Recorder,
    site_label: &'static str,
}

impl<'a> RngDiscipline<'a> {
    pub fn new(
        rng: &'a mut ChaCha20Rng,
        recorder: &'a mut Recorder,
        site_label: &'static str,
    ) -> Self {
        Self {
            rng,
            recorder,
            site_label,
        }
    }
}

/// Delegate the `RngCore` trait to the inner RNG, but record each call.
impl<'a> RngCore for RngDiscipline<'a> {
    fn next_u32(&mut self) -> u32 {
        self.recorder.record_draw(self.site_label);
        self.rng.next_u32()
    }
    fn next_u64(&mut self) -> u64 {
        self.recorder.record_draw(self.site_label);
        self.rng.next_u64()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.recorder.record_draw(self.site_label);
        self.rng.fill_bytes(dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.recorder.record_draw(self.site_label);
        self.rng.try_fill_bytes(dest)
    }
}

/// Records how many random draws were made at each labeled call site, for
/// post-run auditing. Does not itself affect determinism; the seed alone
/// does that.
pub struct Recorder {
    seed: u64,
    rng_sites: BTreeMap<&'static str, u64>,
}

impl Recorder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_sites: BTreeMap::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Records that a random number was drawn at a specific site.
    pub fn record_draw(&mut self, site_label: &'static str) {
        *self.rng_sites.entry(site_label).or_insert(0) += 1;
    }

    pub fn draw_counts(&self) -> &BTreeMap<&'static str, u64> {
        &self.rng_sites
    }
}

/// Draws one exponential waiting time per competing outgoing transition of
/// `link_state` and returns the slot with the minimum draw, together with
/// that draw (§4.4). Drawing one exponential per rate and taking the
/// minimum is statistically equivalent to drawing a single exponential at
/// the summed rate and then choosing a target proportional to rate; the
/// per-slot form is used because it keeps each rule's random draws on its
/// own conceptual stream.
///
/// Panics if `rates` is empty — callers must only invoke this for link
/// states with `n_out >= 1`.
pub fn sample_next_transition<R: rand::Rng>(rng: &mut R, rates: &[f64]) -> (usize, SimTime) {
    assert!(!rates.is_empty(), "sample_next_transition called with no outgoing transitions");

    let mut best_slot = 0;
    let mut best_dt = SimTime::INFINITY;
    for (slot, &rate) in rates.iter().enumerate() {
        let dt = Exp::new(rate)
            .expect("transition rate must be positive")
            .sample(rng);
        if dt < best_dt {
            best_dt = dt;
            best_slot = slot;
        }
    }
    (best_slot, best_dt)
}
