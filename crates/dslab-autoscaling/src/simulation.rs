use std::cell::RefCell;
use std::rc::Rc;

use sugars::{rc, refcell};

use crate::broker::DatacenterBroker;
use crate::core::config::SimulationConfig;
use crate::core::context::{ComponentContext, SimClock};
use crate::core::error::SimulationError;
use crate::core::vm::VirtualMachine;
use crate::core::vm_factory::VmFactory;
use crate::datacenter::Datacenter;
use crate::log_info;

const EPSILON: f64 = 1e-9;

pub struct AutoscalingSimulation {
    clock: SimClock,
    factory: Rc<VmFactory>,
    datacenter: Rc<RefCell<Datacenter>>,
    broker: Rc<RefCell<DatacenterBroker>>,
    ctx: ComponentContext,
    sim_config: Rc<SimulationConfig>,
}

impl AutoscalingSimulation {
    pub fn new(sim_config: SimulationConfig) -> Self {
        let clock = SimClock::new();
        let factory = VmFactory::new(sim_config.vm.clone(), ComponentContext::new("vm_factory", clock.clone()));
        let datacenter = rc!(refcell!(Datacenter::new(
            sim_config.vm_limit,
            ComponentContext::new(&sim_config.datacenter_name, clock.clone()),
        )));
        let broker = rc!(refcell!(DatacenterBroker::new(
            datacenter.clone(),
            ComponentContext::new("broker", clock.clone()),
        )));
        let ctx = ComponentContext::new("simulation", clock.clone());
        Self {
            clock,
            factory,
            datacenter,
            broker,
            ctx,
            sim_config: rc!(sim_config),
        }
    }

    /// Creates scalable VM and submits it to the broker, returns its ID.
    pub fn spawn_scalable_vm(&mut self) -> Result<u32, SimulationError> {
        let vm = self.factory.create_scalable_vm()?;
        Ok(self.broker.borrow_mut().submit_vm(vm)?)
    }

    /// Spawns the number of scalable VMs specified in config.
    pub fn spawn_initial_vms(&mut self) -> Result<Vec<u32>, SimulationError> {
        (0..self.sim_config.initial_vms)
            .map(|_| self.spawn_scalable_vm())
            .collect()
    }

    /// Advances time by one monitoring interval, then refreshes VM utilization and polls scaling policies.
    /// Returns IDs of VMs created by scale-outs.
    pub fn step(&mut self) -> Vec<u32> {
        self.clock.advance(self.sim_config.monitoring_interval);
        let mut broker = self.broker.borrow_mut();
        broker.update_utilization();
        let created = broker.poll_scaling();
        if !created.is_empty() {
            log_info!(
                self.ctx,
                "{} new VMs, {} VMs in total",
                created.len(),
                broker.vm_count()
            );
        }
        created
    }

    /// Performs monitoring ticks until the specified duration passes.
    pub fn step_for_duration(&mut self, duration: f64) -> Vec<u32> {
        let end_time = self.current_time() + duration;
        let mut created = Vec::new();
        while self.current_time() + self.sim_config.monitoring_interval <= end_time + EPSILON {
            created.extend(self.step());
        }
        created
    }

    pub fn current_time(&self) -> f64 {
        self.clock.time()
    }

    pub fn factory(&self) -> Rc<VmFactory> {
        self.factory.clone()
    }

    pub fn broker(&self) -> Rc<RefCell<DatacenterBroker>> {
        self.broker.clone()
    }

    pub fn datacenter(&self) -> Rc<RefCell<Datacenter>> {
        self.datacenter.clone()
    }

    pub fn vm(&self, vm_id: u32) -> Option<VirtualMachine> {
        self.broker.borrow().vm(vm_id).cloned()
    }

    pub fn sim_config(&self) -> Rc<SimulationConfig> {
        self.sim_config.clone()
    }
}
