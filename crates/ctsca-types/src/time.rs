//! # ctsca-types::time
//!
//! Defines the representation of time within the simulation. Time here is
//! continuous (a Gillespie-style engine draws real-valued exponential
//! waiting times), so `SimTime` is `f64` rather than a discrete tick count.

use serde::Deserializer;

/// The fundamental unit of time in the simulation: a continuous, real-valued
/// clock measured in abstract simulation units.
pub type SimTime = f64;

/// The start of simulation time.
pub const SIM_EPOCH: SimTime = 0.0;

/// The sentinel "next update time" for a link whose current link state has
/// no outgoing transitions (I2). Ordinary `f64` ordering places it after
/// every achievable finite time, so no heap special-casing is needed.
pub const NEVER: SimTime = SimTime::INFINITY;

/// Custom deserializer for `SimTime` that also accepts integer literals in
/// scenario files (`stop_at: 1000` as well as `stop_at: 1000.0`).
pub fn deserialize_sim_time<'de, D>(deserializer: D) -> Result<SimTime, D::Error>
where
    D: Deserializer<'de>,
{
    struct SimTimeVisitor;

    impl<'de> serde::de::Visitor<'de> for SimTimeVisitor {
        type Value = SimTime;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a non-negative number of simulation time units")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value < 0.0 {
                return Err(E::custom("SimTime cannot be negative"));
            }
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value < 0 {
                return Err(E::custom("SimTime cannot be negative"));
            }
            Ok(value as f64)
        }
    }

    deserializer.deserialize_any(SimTimeVisitor)
}

/// Custom deserializer for `Option<SimTime>`.
pub fn deserialize_optional_sim_time<'de, D>(deserializer: D) -> Result<Option<SimTime>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalSimTimeVisitor;

    impl<'de> serde::de::Visitor<'de> for OptionalSimTimeVisitor {
        type Value = Option<SimTime>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an optional non-negative number of simulation time units")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserialize_sim_time(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalSimTimeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_every_finite_time() {
        assert!(NEVER > 1.0e300);
        assert!(NEVER > SimTime::MAX);
    }
}
