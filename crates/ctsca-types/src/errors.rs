//! # ctsca-types::errors
//!
//! Defines the error taxonomy shared between `ctsca-engine` and `ctsca-cli`.
//! `DomainError` and `GridContractError` are implementation-detail failures
//! that should never surface once a scenario has validated; `ConfigError` is
//! the only kind a caller is expected to handle as routine input rejection.

use thiserror::Error;

/// Invalid rule lists, malformed initial state, or an unsupported orientation
/// count. All `ConfigError`s are detected at construction time, before the
/// event loop runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("transition rule list is empty")]
    EmptyRuleList,
    #[error("transition rules mix id form and triple form; a rule list must use exactly one")]
    MixedRuleForms,
    #[error("transition rule references cell state {0}, but only {1} cell states are defined")]
    CellStateOutOfRange(u32, u32),
    #[error("transition rule references orientation {0}, but N_orient = {1}")]
    OrientationOutOfRange(u32, u32),
    #[error("transition rule references link state id {0}, but N_link = {1}")]
    LinkStateOutOfRange(u32, u32),
    #[error("transition rate must be positive, got {0}")]
    NonPositiveRate(f64),
    #[error("initial cell-state array has length {actual}, but the grid has {expected} nodes")]
    InitialStateLengthMismatch { expected: usize, actual: usize },
    #[error("unsupported orientation count {0}; must be 1, 2, or 3")]
    InvalidOrientationCount(u32),
    #[error("I/O error reading scenario file: {0}")]
    Io(String),
    #[error("TOML parsing error: {0}")]
    Toml(String),
    #[error("YAML parsing error: {0}")]
    Yaml(String),
    #[error("scenario '{name}' failed validation: {message}")]
    Validation { name: String, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e.to_string())
    }
}

/// A breach of the codec's own invariants: an out-of-range input reached a
/// code path that a validated configuration should have made unreachable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("cell state {0} is out of range for N_cell = {1}")]
    CellStateOutOfRange(u32, u32),
    #[error("orientation {0} is out of range for N_orient = {1}")]
    OrientationOutOfRange(u32, u32),
    #[error("link state id {0} is out of range for N_link = {1}")]
    LinkStateOutOfRange(u32, u32),
}

/// The grid adapter returned data outside the ranges it declared. Detected
/// once, at engine initialization, by validating every link the adapter
/// reports before the event loop ever runs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridContractError {
    #[error("grid reports orientation {0} for link {1}, but declared N_orient = {2}")]
    OrientationOutOfRange(u32, u32, u32),
    #[error("grid reports endpoint node {0} for link {1}, but node_count() = {2}")]
    EndpointOutOfRange(u32, u32, u32),
}

/// Top-level error returned by engine construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    GridContract(#[from] GridContractError),
}
