//! Overload predicates deciding whether a VM needs more capacity.

use dyn_clone::{clone_trait_object, DynClone};

use crate::core::config::{parse_config_value, parse_f64_option, parse_options};
use crate::core::error::ConfigurationError;
use crate::core::vm::VirtualMachine;

/// Utilization fraction above which a VM is considered overloaded by default.
pub const DEFAULT_OVERLOAD_THRESHOLD: f64 = 0.7;

/// Trait for implementation of VM overload conditions.
///
/// The predicate is a pure function of the current VM utilization snapshot.
/// It keeps no state between invocations.
pub trait OverloadPredicate: DynClone {
    fn is_overloaded(&self, vm: &VirtualMachine) -> bool;

    fn name(&self) -> String;
}

clone_trait_object!(OverloadPredicate);

/// Builds overload predicate from config string such as `CpuOverload[threshold=0.8]`.
pub fn overload_predicate_resolver(config_str: &str) -> Result<Box<dyn OverloadPredicate>, ConfigurationError> {
    let (predicate_name, options) = parse_config_value(config_str);
    let options = parse_options(&options.unwrap_or_default());
    let threshold = parse_f64_option(&options, "threshold", DEFAULT_OVERLOAD_THRESHOLD)?;
    match predicate_name.as_str() {
        "MemoryOverload" => Ok(Box::new(MemoryOverload::new(threshold))),
        "CpuOverload" => Ok(Box::new(CpuOverload::new(threshold))),
        _ => Err(ConfigurationError::UnknownModel {
            kind: "overload predicate",
            name: predicate_name,
        }),
    }
}

////////////////////////////////////////////////////////////////////////////////

/// VM is overloaded when its memory utilization strictly exceeds the threshold.
#[derive(Clone)]
pub struct MemoryOverload {
    threshold: f64,
}

impl MemoryOverload {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for MemoryOverload {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLOAD_THRESHOLD)
    }
}

impl OverloadPredicate for MemoryOverload {
    fn is_overloaded(&self, vm: &VirtualMachine) -> bool {
        vm.memory_utilization() > self.threshold
    }

    fn name(&self) -> String {
        format!("MemoryOverload[threshold={}]", self.threshold)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// VM is overloaded when its CPU utilization strictly exceeds the threshold.
#[derive(Clone)]
pub struct CpuOverload {
    threshold: f64,
}

impl CpuOverload {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for CpuOverload {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLOAD_THRESHOLD)
    }
}

impl OverloadPredicate for CpuOverload {
    fn is_overloaded(&self, vm: &VirtualMachine) -> bool {
        vm.cpu_utilization() > self.threshold
    }

    fn name(&self) -> String {
        format!("CpuOverload[threshold={}]", self.threshold)
    }
}
