//! Errors raised while provisioning VMs.

use thiserror::Error;

/// Configuration does not allow to provision a VM.
///
/// These errors are fatal for the current provisioning request and are never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{field}` must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("invalid value `{value}` for option `{option}`")]
    InvalidOption { option: String, value: String },

    #[error("unknown {kind}: {name}")]
    UnknownModel { kind: &'static str, name: String },

    #[error("can't read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// VM could not be accepted by datacenter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("datacenter {datacenter} is full ({limit} VMs)")]
    DatacenterFull { datacenter: String, limit: usize },
}

/// Any error produced while driving the simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
