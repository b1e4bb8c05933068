//! Horizontal VM scaling policy.

use std::rc::Rc;

use crate::core::error::ConfigurationError;
use crate::core::overload::OverloadPredicate;
use crate::core::vm::VirtualMachine;

/// Scaling types supported by the VM factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalingType {
    /// Add whole VM instances when a VM is overloaded.
    Horizontal,
}

impl ScalingType {
    /// Scaling type used when config does not request any.
    pub const ABSENT_DEFAULT: ScalingType = ScalingType::Horizontal;

    /// Scaling type used instead of an unsupported one.
    pub const FALLBACK: ScalingType = ScalingType::Horizontal;
}

/// Result of resolving the scaling type selector from config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalingTypeSelection {
    Absent,
    Supported(ScalingType),
    Unsupported(String),
}

impl ScalingTypeSelection {
    pub fn resolve(selector: Option<&str>) -> Self {
        match selector {
            None => ScalingTypeSelection::Absent,
            Some("horizontal") => ScalingTypeSelection::Supported(ScalingType::Horizontal),
            Some(other) => ScalingTypeSelection::Unsupported(other.to_string()),
        }
    }
}

/// Source of new VMs used for scaling out.
pub trait VmSupplier {
    fn supply_vm(&self) -> Result<VirtualMachine, ConfigurationError>;
}

/// Reactive "create on overload" policy attached to a VM.
///
/// The policy does not poll anything by itself. The broker evaluates [`HorizontalVmScaling::is_overloaded`]
/// once per monitoring interval and calls [`HorizontalVmScaling::supply_vm`] when it returns true.
#[derive(Clone)]
pub struct HorizontalVmScaling {
    overload_predicate: Box<dyn OverloadPredicate>,
    vm_supplier: Rc<dyn VmSupplier>,
}

impl HorizontalVmScaling {
    pub fn new(overload_predicate: Box<dyn OverloadPredicate>, vm_supplier: Rc<dyn VmSupplier>) -> Self {
        Self {
            overload_predicate,
            vm_supplier,
        }
    }

    pub fn is_overloaded(&self, vm: &VirtualMachine) -> bool {
        self.overload_predicate.is_overloaded(vm)
    }

    pub fn supply_vm(&self) -> Result<VirtualMachine, ConfigurationError> {
        self.vm_supplier.supply_vm()
    }

    pub fn predicate_name(&self) -> String {
        self.overload_predicate.name()
    }
}
