//! Representation of virtual machine.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::core::cloudlet_scheduler::CloudletScheduler;
use crate::core::config::VmResources;
use crate::core::load_model::LoadModel;
use crate::core::scaling::HorizontalVmScaling;

/// Represents virtual machine (VM).
///
// VM is characterized by its ID, fixed resource sizing and cloudlet scheduling discipline.
// Its actual utilization is defined by load models and is refreshed by the broker via `update_utilization`,
// so that overload predicates see a consistent snapshot during one monitoring tick.
#[derive(Clone)]
pub struct VirtualMachine {
    pub id: u32,
    pub mips_capacity: u64,
    pub pes: u32,
    pub ram: u64,
    pub bandwidth: u64,
    pub storage: u64,
    pub timezone: f64,
    pub cloudlet_scheduler: CloudletScheduler,
    start_time: f64,
    cpu_load_model: Box<dyn LoadModel>,
    memory_load_model: Box<dyn LoadModel>,
    cpu_utilization: f64,
    memory_utilization: f64,
    datacenter: Option<String>,
    horizontal_scaling: Option<HorizontalVmScaling>,
}

impl Serialize for VirtualMachine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("VirtualMachine", 11)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("mips_capacity", &self.mips_capacity)?;
        state.serialize_field("pes", &self.pes)?;
        state.serialize_field("ram", &self.ram)?;
        state.serialize_field("bandwidth", &self.bandwidth)?;
        state.serialize_field("storage", &self.storage)?;
        state.serialize_field("timezone", &self.timezone)?;
        state.serialize_field("cloudlet_scheduler", &self.cloudlet_scheduler)?;
        state.serialize_field("datacenter", &self.datacenter)?;
        state.serialize_field("memory_utilization", &self.memory_utilization)?;
        state.serialize_field("scalable", &self.horizontal_scaling.is_some())?;
        state.end()
    }
}

impl VirtualMachine {
    /// Creates virtual machine with specified parameters and no scaling policy.
    pub fn new(
        id: u32,
        resources: VmResources,
        cloudlet_scheduler: CloudletScheduler,
        cpu_load_model: Box<dyn LoadModel>,
        memory_load_model: Box<dyn LoadModel>,
    ) -> Self {
        Self {
            id,
            mips_capacity: resources.mips_capacity,
            pes: resources.pes,
            ram: resources.ram,
            bandwidth: resources.bandwidth,
            storage: resources.storage,
            timezone: resources.timezone,
            cloudlet_scheduler,
            start_time: 0.,
            cpu_load_model,
            memory_load_model,
            cpu_utilization: 0.,
            memory_utilization: 0.,
            datacenter: None,
            horizontal_scaling: None,
        }
    }

    /// Returns the total VM capacity in MIPS over all cores.
    pub fn total_mips_capacity(&self) -> u64 {
        self.mips_capacity.saturating_mul(self.pes as u64)
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn set_start_time(&mut self, time: f64) {
        self.start_time = time;
    }

    /// Refreshes the utilization snapshot by invoking the load models. Values are clamped to [0, 1].
    pub fn update_utilization(&mut self, time: f64) {
        let time_from_start = time - self.start_time;
        self.cpu_utilization = self
            .cpu_load_model
            .get_resource_load(time, time_from_start)
            .clamp(0., 1.);
        self.memory_utilization = self
            .memory_load_model
            .get_resource_load(time, time_from_start)
            .clamp(0., 1.);
    }

    /// Returns the fraction of VM CPU capacity used at the last utilization update.
    pub fn cpu_utilization(&self) -> f64 {
        self.cpu_utilization
    }

    /// Returns the fraction of VM memory used at the last utilization update.
    pub fn memory_utilization(&self) -> f64 {
        self.memory_utilization
    }

    /// Returns the name of datacenter the VM was placed into, if any.
    pub fn datacenter(&self) -> Option<&str> {
        self.datacenter.as_deref()
    }

    pub fn set_datacenter(&mut self, datacenter: &str) {
        self.datacenter = Some(datacenter.to_string());
    }

    pub fn horizontal_scaling(&self) -> Option<&HorizontalVmScaling> {
        self.horizontal_scaling.as_ref()
    }

    /// Attaches horizontal scaling policy to the VM, replacing the previous one.
    pub fn set_horizontal_scaling(&mut self, scaling: HorizontalVmScaling) {
        self.horizontal_scaling = Some(scaling);
    }
}
