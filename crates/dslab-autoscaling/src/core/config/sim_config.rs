//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::core::config::vm_config::VmConfig;
use crate::core::error::ConfigurationError;

/// Holds raw simulation config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawSimulationConfig {
    pub monitoring_interval: Option<f64>,
    pub initial_vms: Option<u32>,
    pub datacenter: Option<DatacenterConfig>,
    pub vm: Option<VmConfig>,
}

/// Holds configuration of the datacenter receiving VMs.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct DatacenterConfig {
    /// Datacenter name.
    pub name: Option<String>,
    /// Maximum number of VMs the datacenter accepts, unlimited if not set.
    pub vm_limit: Option<usize>,
}

/// Represents simulation configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Period in seconds between two consecutive polls of VM scaling policies.
    pub monitoring_interval: f64,
    /// Number of scalable VMs spawned at simulation start.
    pub initial_vms: u32,
    /// Datacenter name.
    pub datacenter_name: String,
    /// Maximum number of VMs in datacenter.
    pub vm_limit: Option<usize>,
    /// Resource configuration of created VMs.
    pub vm: VmConfig,
}

impl SimulationConfig {
    /// Creates config with default values for the given VM configuration.
    pub fn new(vm: VmConfig) -> Self {
        Self {
            monitoring_interval: 1.,
            initial_vms: 1,
            datacenter_name: "datacenter".to_string(),
            vm_limit: None,
            vm,
        }
    }

    /// Creates simulation config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(file_name).map_err(|source| ConfigurationError::Io {
            path: file_name.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parses simulation config from YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigurationError> {
        let raw: RawSimulationConfig = serde_yaml::from_str(content)?;
        let datacenter = raw.datacenter.unwrap_or_default();
        let monitoring_interval = raw.monitoring_interval.unwrap_or(1.);
        if !(monitoring_interval.is_finite() && monitoring_interval > 0.) {
            return Err(ConfigurationError::OutOfRange {
                field: "monitoring_interval",
                value: monitoring_interval.to_string(),
            });
        }
        Ok(Self {
            monitoring_interval,
            initial_vms: raw.initial_vms.unwrap_or(1),
            datacenter_name: datacenter.name.unwrap_or_else(|| "datacenter".to_string()),
            vm_limit: datacenter.vm_limit,
            vm: raw.vm.unwrap_or_default(),
        })
    }
}
