//! VM resource configuration.

use serde::{Deserialize, Serialize};

use crate::core::cloudlet_scheduler::CloudletScheduler;
use crate::core::error::ConfigurationError;
use crate::core::scaling::ScalingTypeSelection;

/// Default overload condition used when `overloadPredicate` is not set.
pub const DEFAULT_OVERLOAD_PREDICATE: &str = "MemoryOverload[threshold=0.7]";

/// Default load model used when `cpuLoadModel` or `memoryLoadModel` is not set.
pub const DEFAULT_LOAD_MODEL: &str = "ConstLoadModel[load=0]";

/// Valid range of VM timezone offsets in hours.
const TIMEZONE_RANGE: (f64, f64) = (-12., 14.);

/// Holds VM resource description as it is written in config.
///
/// All values are optional at this level, required ones are checked by [`VmConfig::resources`] when a VM is created,
/// so that the same config can be edited at runtime before any VM is built from it.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VmConfig {
    /// Capacity of each VM core in MIPS.
    pub mips_capacity: Option<i64>,
    /// Number of VM cores.
    #[serde(rename = "PEs")]
    pub pes: Option<i64>,
    /// VM memory in MB.
    #[serde(rename = "RAMInMBs")]
    pub ram: Option<i64>,
    /// VM bandwidth in MB/s.
    #[serde(rename = "BandwidthInMBps")]
    pub bandwidth: Option<i64>,
    /// VM storage in MB.
    #[serde(rename = "StorageInMBs")]
    pub storage: Option<i64>,
    /// Timezone offset in hours.
    pub timezone: Option<f64>,
    /// Cloudlet scheduler selector: "time", "space" or anything else for completely fair scheduling.
    pub cloudlet_scheduler: Option<String>,
    /// Scaling is enabled only if this is set to "yes".
    pub scaling_enabled: Option<String>,
    /// Scaling type, "horizontal" by default.
    pub scaling_type: Option<String>,
    /// Overload predicate in the form Name[options], see [`crate::core::overload`].
    pub overload_predicate: Option<String>,
    /// CPU load model in the form Name[options], see [`crate::core::load_model`].
    pub cpu_load_model: Option<String>,
    /// Memory load model in the form Name[options], see [`crate::core::load_model`].
    pub memory_load_model: Option<String>,
}

/// Validated VM sizing.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct VmResources {
    pub mips_capacity: u64,
    pub pes: u32,
    pub ram: u64,
    pub bandwidth: u64,
    pub storage: u64,
    pub timezone: f64,
}

fn require_non_negative(value: Option<i64>, field: &'static str) -> Result<u64, ConfigurationError> {
    let value = value.ok_or(ConfigurationError::MissingField(field))?;
    u64::try_from(value).map_err(|_| ConfigurationError::NegativeValue { field, value })
}

impl VmConfig {
    /// Reads VM config from YAML file.
    pub fn from_file(file_name: &str) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(file_name).map_err(|source| ConfigurationError::Io {
            path: file_name.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parses VM config from YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Checks that all required fields are present and valid and returns the VM sizing.
    pub fn resources(&self) -> Result<VmResources, ConfigurationError> {
        let mips_capacity = require_non_negative(self.mips_capacity, "mipsCapacity")?;
        let pes = require_non_negative(self.pes, "PEs")?;
        let pes = u32::try_from(pes).map_err(|_| ConfigurationError::OutOfRange {
            field: "PEs",
            value: pes.to_string(),
        })?;
        let ram = require_non_negative(self.ram, "RAMInMBs")?;
        let bandwidth = require_non_negative(self.bandwidth, "BandwidthInMBps")?;
        let storage = require_non_negative(self.storage, "StorageInMBs")?;
        let timezone = self.timezone.ok_or(ConfigurationError::MissingField("timezone"))?;
        if !(TIMEZONE_RANGE.0..=TIMEZONE_RANGE.1).contains(&timezone) {
            return Err(ConfigurationError::OutOfRange {
                field: "timezone",
                value: timezone.to_string(),
            });
        }
        Ok(VmResources {
            mips_capacity,
            pes,
            ram,
            bandwidth,
            storage,
            timezone,
        })
    }

    /// Returns cloudlet scheduler selected by config.
    pub fn cloudlet_scheduler(&self) -> CloudletScheduler {
        CloudletScheduler::resolve(self.cloudlet_scheduler.as_deref())
    }

    /// Returns true if scaling is enabled.
    pub fn scaling_enabled(&self) -> bool {
        self.scaling_enabled.as_deref() == Some("yes")
    }

    /// Returns scaling type requested by config.
    pub fn scaling_type(&self) -> ScalingTypeSelection {
        ScalingTypeSelection::resolve(self.scaling_type.as_deref())
    }

    pub fn overload_predicate(&self) -> &str {
        self.overload_predicate.as_deref().unwrap_or(DEFAULT_OVERLOAD_PREDICATE)
    }

    pub fn cpu_load_model(&self) -> &str {
        self.cpu_load_model.as_deref().unwrap_or(DEFAULT_LOAD_MODEL)
    }

    pub fn memory_load_model(&self) -> &str {
        self.memory_load_model.as_deref().unwrap_or(DEFAULT_LOAD_MODEL)
    }
}
