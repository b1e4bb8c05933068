//! Broker owning VMs and polling their scaling policies.

use std::cell::RefCell;
use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::core::context::ComponentContext;
use crate::core::error::PlacementError;
use crate::core::scaling::HorizontalVmScaling;
use crate::core::vm::VirtualMachine;
use crate::datacenter::Datacenter;
use crate::{log_debug, log_error, log_info, log_trace, log_warn};

/// Owns submitted VMs and drives their scaling policies.
///
/// On every monitoring tick the broker refreshes VM utilization and then evaluates the overload predicate
/// of each scalable VM exactly once. Each positive evaluation produces exactly one new VM from the policy supplier.
/// VMs created during a tick are polled starting from the next tick.
pub struct DatacenterBroker {
    vms: BTreeMap<u32, VirtualMachine>,
    datacenter: Rc<RefCell<Datacenter>>,
    scale_out_count: u64,
    rejected_count: u64,
    ctx: ComponentContext,
}

impl DatacenterBroker {
    pub fn new(datacenter: Rc<RefCell<Datacenter>>, ctx: ComponentContext) -> Self {
        Self {
            vms: BTreeMap::new(),
            datacenter,
            scale_out_count: 0,
            rejected_count: 0,
            ctx,
        }
    }

    /// Places VM into the datacenter and takes ownership of it.
    pub fn submit_vm(&mut self, mut vm: VirtualMachine) -> Result<u32, PlacementError> {
        self.datacenter.borrow_mut().place(&mut vm)?;
        let time = self.ctx.time();
        vm.set_start_time(time);
        vm.update_utilization(time);
        let id = vm.id;
        self.vms.insert(id, vm);
        Ok(id)
    }

    /// Refreshes utilization snapshots of all VMs.
    pub fn update_utilization(&mut self) {
        let time = self.ctx.time();
        for vm in self.vms.values_mut() {
            vm.update_utilization(time);
            log_trace!(
                self.ctx,
                "VM #{} utilization: cpu={:.3} memory={:.3}",
                vm.id,
                vm.cpu_utilization(),
                vm.memory_utilization()
            );
        }
    }

    /// Polls scaling policies of all VMs and returns IDs of VMs created by scale-outs.
    pub fn poll_scaling(&mut self) -> Vec<u32> {
        let overloaded: Vec<(u32, HorizontalVmScaling)> = self
            .vms
            .values()
            .filter_map(|vm| {
                let scaling = vm.horizontal_scaling()?;
                if scaling.is_overloaded(vm) {
                    log_debug!(
                        self.ctx,
                        "VM #{} is overloaded according to {}",
                        vm.id,
                        scaling.predicate_name()
                    );
                    Some((vm.id, scaling.clone()))
                } else {
                    None
                }
            })
            .collect();

        let mut created = Vec::new();
        for (source_vm_id, scaling) in overloaded {
            let vm = match scaling.supply_vm() {
                Ok(vm) => vm,
                Err(e) => {
                    log_error!(self.ctx, "can't scale out VM #{}: {}", source_vm_id, e);
                    continue;
                }
            };
            let new_vm_id = vm.id;
            match self.submit_vm(vm) {
                Ok(id) => {
                    self.scale_out_count += 1;
                    log_info!(self.ctx, "scaled out VM #{} with new VM #{}", source_vm_id, id);
                    created.push(id);
                }
                Err(e) => {
                    self.rejected_count += 1;
                    log_warn!(self.ctx, "new VM #{} for VM #{} rejected: {}", new_vm_id, source_vm_id, e);
                }
            }
        }
        created
    }

    pub fn vm(&self, vm_id: u32) -> Option<&VirtualMachine> {
        self.vms.get(&vm_id)
    }

    pub fn vm_mut(&mut self, vm_id: u32) -> Option<&mut VirtualMachine> {
        self.vms.get_mut(&vm_id)
    }

    /// Returns an iterator over owned VMs ordered by ID.
    pub fn vms(&self) -> Values<u32, VirtualMachine> {
        self.vms.values()
    }

    pub fn vm_count(&self) -> usize {
        self.vms.len()
    }

    /// Returns the number of VMs created by scaling policies and accepted by datacenter.
    pub fn scale_out_count(&self) -> u64 {
        self.scale_out_count
    }

    /// Returns the number of VMs created by scaling policies but rejected by datacenter.
    pub fn rejected_count(&self) -> u64 {
        self.rejected_count
    }
}
