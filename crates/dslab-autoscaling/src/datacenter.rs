//! Datacenter accepting VMs.

use std::collections::BTreeSet;

use crate::core::context::ComponentContext;
use crate::core::error::PlacementError;
use crate::core::vm::VirtualMachine;
use crate::log_info;

/// Named datacenter with an optional limit on the number of hosted VMs.
///
/// Host-level placement is not modeled, the datacenter only records which VMs it hosts.
pub struct Datacenter {
    vm_limit: Option<usize>,
    vms: BTreeSet<u32>,
    ctx: ComponentContext,
}

impl Datacenter {
    pub fn new(vm_limit: Option<usize>, ctx: ComponentContext) -> Self {
        Self {
            vm_limit,
            vms: BTreeSet::new(),
            ctx,
        }
    }

    pub fn name(&self) -> &str {
        self.ctx.name()
    }

    /// Accepts VM if there is room for it and records the datacenter name in the VM.
    pub fn place(&mut self, vm: &mut VirtualMachine) -> Result<(), PlacementError> {
        if let Some(limit) = self.vm_limit {
            if self.vms.len() >= limit {
                return Err(PlacementError::DatacenterFull {
                    datacenter: self.name().to_string(),
                    limit,
                });
            }
        }
        self.vms.insert(vm.id);
        vm.set_datacenter(self.ctx.name());
        log_info!(
            self.ctx,
            "placed VM #{} in datacenter {} ({} VMs total)",
            vm.id,
            self.ctx.name(),
            self.vms.len()
        );
        Ok(())
    }

    pub fn vm_count(&self) -> usize {
        self.vms.len()
    }

    pub fn hosts_vm(&self, vm_id: u32) -> bool {
        self.vms.contains(&vm_id)
    }
}
