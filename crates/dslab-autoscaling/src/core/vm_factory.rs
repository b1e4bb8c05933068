//! Factory building VMs from resource configuration.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sugars::{rc, refcell};

use crate::core::config::VmConfig;
use crate::core::context::ComponentContext;
use crate::core::error::ConfigurationError;
use crate::core::load_model::load_model_resolver;
use crate::core::overload::{overload_predicate_resolver, OverloadPredicate};
use crate::core::scaling::{HorizontalVmScaling, ScalingType, ScalingTypeSelection, VmSupplier};
use crate::core::vm::VirtualMachine;
use crate::{log_info, log_warn};

/// Creates VMs according to the current VM config and assigns them sequential IDs starting from 0.
///
/// The ID counter belongs to the factory instance, so several factories produce independent ID sequences.
/// The factory is also the [`VmSupplier`] of the scaling policies it attaches, hence it always lives behind `Rc`.
pub struct VmFactory {
    config: RefCell<VmConfig>,
    next_vm_id: Cell<u32>,
    ctx: ComponentContext,
}

impl VmFactory {
    pub fn new(config: VmConfig, ctx: ComponentContext) -> Rc<Self> {
        rc!(Self {
            config: refcell!(config),
            next_vm_id: Cell::new(0),
            ctx,
        })
    }

    /// Returns a copy of the current VM config.
    pub fn config(&self) -> VmConfig {
        self.config.borrow().clone()
    }

    /// Modifies VM config. VMs created afterwards, including ones created by scaling policies
    /// attached earlier, use the updated config.
    pub fn update_config<F: FnOnce(&mut VmConfig)>(&self, f: F) {
        f(&mut self.config.borrow_mut());
    }

    /// Returns the number of VMs created so far.
    pub fn created_vm_count(&self) -> u32 {
        self.next_vm_id.get()
    }

    /// Creates VM without scaling policy.
    ///
    /// Fails if some required resource field is missing or invalid, in that case no ID is consumed.
    pub fn create_vm(&self) -> Result<VirtualMachine, ConfigurationError> {
        let config = self.config.borrow();
        let resources = config.resources()?;
        let cpu_load_model = load_model_resolver(config.cpu_load_model())?;
        let memory_load_model = load_model_resolver(config.memory_load_model())?;

        let id = self.next_vm_id.get();
        self.next_vm_id.set(id + 1);

        let vm = VirtualMachine::new(
            id,
            resources,
            config.cloudlet_scheduler(),
            cpu_load_model,
            memory_load_model,
        );
        log_info!(
            self.ctx,
            "created VM #{} in datacenter {}",
            vm.id,
            vm.datacenter().unwrap_or("<unplaced>")
        );
        Ok(vm)
    }

    /// Creates VM and attaches scaling policy to it if scaling is enabled in config.
    ///
    /// Unsupported scaling types are not an error: horizontal scaling is used instead.
    /// The overload predicate is resolved before the VM is created, so a broken predicate config
    /// does not use up an ID.
    pub fn create_scalable_vm(self: &Rc<Self>) -> Result<VirtualMachine, ConfigurationError> {
        let scaling = {
            let config = self.config.borrow();
            if config.scaling_enabled() {
                Some((
                    config.scaling_type(),
                    overload_predicate_resolver(config.overload_predicate())?,
                ))
            } else {
                None
            }
        };

        let mut vm = self.create_vm()?;
        let (selection, overload_predicate) = match scaling {
            Some(scaling) => scaling,
            None => return Ok(vm),
        };

        let scaling_type = match selection {
            ScalingTypeSelection::Absent => ScalingType::ABSENT_DEFAULT,
            ScalingTypeSelection::Supported(scaling_type) => scaling_type,
            ScalingTypeSelection::Unsupported(name) => {
                log_warn!(
                    self.ctx,
                    "scaling type {} is not implemented, falling back to horizontal scaling",
                    name
                );
                ScalingType::FALLBACK
            }
        };

        match scaling_type {
            ScalingType::Horizontal => {
                log_info!(self.ctx, "enabling horizontal scaling for VM #{}", vm.id);
                self.attach_scaling_with_predicate(&mut vm, overload_predicate);
            }
        }
        Ok(vm)
    }

    /// Attaches horizontal scaling policy with this factory as VM supplier
    /// and the overload predicate selected by config.
    pub fn attach_horizontal_scaling(self: &Rc<Self>, vm: &mut VirtualMachine) -> Result<(), ConfigurationError> {
        let overload_predicate = overload_predicate_resolver(self.config.borrow().overload_predicate())?;
        self.attach_scaling_with_predicate(vm, overload_predicate);
        Ok(())
    }

    fn attach_scaling_with_predicate(
        self: &Rc<Self>,
        vm: &mut VirtualMachine,
        overload_predicate: Box<dyn OverloadPredicate>,
    ) {
        let vm_supplier: Rc<dyn VmSupplier> = self.clone();
        vm.set_horizontal_scaling(HorizontalVmScaling::new(overload_predicate, vm_supplier));
    }
}

impl VmSupplier for VmFactory {
    fn supply_vm(&self) -> Result<VirtualMachine, ConfigurationError> {
        self.create_vm()
    }
}
