use std::rc::Rc;

use dslab_autoscaling::core::cloudlet_scheduler::CloudletScheduler;
use dslab_autoscaling::core::config::{VmConfig, VmResources};
use dslab_autoscaling::core::context::{ComponentContext, SimClock};
use dslab_autoscaling::core::error::ConfigurationError;
use dslab_autoscaling::core::load_model::ConstLoadModel;
use dslab_autoscaling::core::overload::{overload_predicate_resolver, CpuOverload, MemoryOverload, OverloadPredicate};
use dslab_autoscaling::core::scaling::{ScalingType, ScalingTypeSelection};
use dslab_autoscaling::core::vm::VirtualMachine;
use dslab_autoscaling::core::vm_factory::VmFactory;

fn name_wrapper(file_name: &str) -> String {
    format!("test-configs/{}", file_name)
}

fn factory(config: VmConfig) -> Rc<VmFactory> {
    VmFactory::new(config, ComponentContext::new("vm_factory", SimClock::new()))
}

fn scalable_config() -> VmConfig {
    VmConfig::from_file(&name_wrapper("vm_scalable.yaml")).unwrap()
}

fn loaded_vm(cpu_load: f64, memory_load: f64) -> VirtualMachine {
    let resources = VmResources {
        mips_capacity: 1000,
        pes: 1,
        ram: 1024,
        bandwidth: 100,
        storage: 1000,
        timezone: 0.,
    };
    let mut vm = VirtualMachine::new(
        42,
        resources,
        CloudletScheduler::SpaceShared,
        Box::new(ConstLoadModel::new(cpu_load)),
        Box::new(ConstLoadModel::new(memory_load)),
    );
    vm.update_utilization(0.);
    vm
}

#[test]
// Scaling enabled without scaling type attaches horizontal scaling with a working supplier.
fn test_scaling_attached() {
    let factory = factory(scalable_config());
    let vm = factory.create_scalable_vm().unwrap();
    assert_eq!(vm.id, 0);

    let scaling = vm.horizontal_scaling().expect("scaling policy must be attached");
    let new_vm = scaling.supply_vm().unwrap();
    assert!(new_vm.id > vm.id);
    assert!(new_vm.horizontal_scaling().is_none());
    assert_eq!(factory.created_vm_count(), 2);
}

#[test]
fn test_scaling_disabled() {
    for flag in [None, Some("no"), Some("true"), Some("YES")] {
        let factory = factory(VmConfig {
            scaling_enabled: flag.map(|s| s.to_string()),
            ..scalable_config()
        });
        let vm = factory.create_scalable_vm().unwrap();
        assert!(vm.horizontal_scaling().is_none(), "flag {:?}", flag);
    }
}

#[test]
// Explicit horizontal scaling type.
fn test_horizontal_scaling_type() {
    let factory = factory(VmConfig {
        scaling_type: Some("horizontal".to_string()),
        ..scalable_config()
    });
    let vm = factory.create_scalable_vm().unwrap();
    assert!(vm.horizontal_scaling().is_some());
}

#[test]
fn test_scaling_type_selection() {
    assert_eq!(ScalingTypeSelection::resolve(None), ScalingTypeSelection::Absent);
    assert_eq!(
        ScalingTypeSelection::resolve(Some("horizontal")),
        ScalingTypeSelection::Supported(ScalingType::Horizontal)
    );
    assert_eq!(
        ScalingTypeSelection::resolve(Some("vertical")),
        ScalingTypeSelection::Unsupported("vertical".to_string())
    );
}

#[test]
// The supplier sees config changes made after the policy was attached.
fn test_supplier_uses_current_config() {
    let factory = factory(scalable_config());
    let vm = factory.create_scalable_vm().unwrap();
    assert_eq!(vm.ram, 2048);

    factory.update_config(|config| {
        config.ram = Some(8192);
        config.cloudlet_scheduler = Some("time".to_string());
    });
    let new_vm = vm.horizontal_scaling().unwrap().supply_vm().unwrap();
    assert_eq!(new_vm.ram, 8192);
    assert_eq!(new_vm.cloudlet_scheduler, CloudletScheduler::TimeShared);
}

#[test]
// The supplier reports config errors instead of producing a VM.
fn test_supplier_propagates_config_error() {
    let factory = factory(scalable_config());
    let vm = factory.create_scalable_vm().unwrap();

    factory.update_config(|config| config.mips_capacity = None);
    let result = vm.horizontal_scaling().unwrap().supply_vm();
    assert!(matches!(result, Err(ConfigurationError::MissingField("mipsCapacity"))));
    assert_eq!(factory.created_vm_count(), 1);
}

#[test]
// Memory predicate uses strict comparison with 0.7.
fn test_memory_overload_boundary() {
    let predicate = MemoryOverload::default();
    assert!(predicate.is_overloaded(&loaded_vm(0., 0.71)));
    assert!(!predicate.is_overloaded(&loaded_vm(0., 0.7)));
    assert!(!predicate.is_overloaded(&loaded_vm(1., 0.5)));
}

#[test]
fn test_cpu_overload_boundary() {
    let predicate = CpuOverload::default();
    assert!(predicate.is_overloaded(&loaded_vm(0.71, 0.)));
    assert!(!predicate.is_overloaded(&loaded_vm(0.7, 0.)));
    assert!(!predicate.is_overloaded(&loaded_vm(0.5, 1.)));
}

#[test]
// Attached policy checks memory utilization by default.
fn test_default_attached_predicate() {
    let factory = factory(scalable_config());
    let vm = factory.create_scalable_vm().unwrap();
    let scaling = vm.horizontal_scaling().unwrap();
    assert_eq!(scaling.predicate_name(), "MemoryOverload[threshold=0.7]");
    assert!(scaling.is_overloaded(&loaded_vm(0., 0.71)));
    assert!(!scaling.is_overloaded(&loaded_vm(0., 0.7)));
    assert!(!scaling.is_overloaded(&loaded_vm(0.9, 0.)));
}

#[test]
fn test_configured_cpu_predicate() {
    let factory = factory(VmConfig {
        overload_predicate: Some("CpuOverload[threshold=0.5]".to_string()),
        ..scalable_config()
    });
    let vm = factory.create_scalable_vm().unwrap();
    let scaling = vm.horizontal_scaling().unwrap();
    assert_eq!(scaling.predicate_name(), "CpuOverload[threshold=0.5]");
    assert!(scaling.is_overloaded(&loaded_vm(0.51, 0.)));
    assert!(!scaling.is_overloaded(&loaded_vm(0.5, 1.)));
}

#[test]
fn test_predicate_resolver() {
    let predicate = overload_predicate_resolver("CpuOverload").unwrap();
    assert_eq!(predicate.name(), "CpuOverload[threshold=0.7]");

    assert!(matches!(
        overload_predicate_resolver("MemoryOverload[threshold=high]"),
        Err(ConfigurationError::InvalidOption { .. })
    ));
    assert!(matches!(
        overload_predicate_resolver("DiskOverload"),
        Err(ConfigurationError::UnknownModel {
            kind: "overload predicate",
            ..
        })
    ));
}

#[test]
// Broken predicate config fails before the VM is created, so no ID is used up.
fn test_invalid_predicate_keeps_ids() {
    let factory = factory(VmConfig {
        overload_predicate: Some("DiskOverload".to_string()),
        ..scalable_config()
    });
    assert!(matches!(
        factory.create_scalable_vm(),
        Err(ConfigurationError::UnknownModel {
            kind: "overload predicate",
            ..
        })
    ));
    factory.update_config(|config| config.overload_predicate = Some("MemoryOverload[threshold=high]".to_string()));
    assert!(matches!(
        factory.create_scalable_vm(),
        Err(ConfigurationError::InvalidOption { .. })
    ));
    assert_eq!(factory.created_vm_count(), 0);

    factory.update_config(|config| config.overload_predicate = None);
    let vm = factory.create_scalable_vm().unwrap();
    assert_eq!(vm.id, 0);
    assert!(vm.horizontal_scaling().is_some());
}

#[test]
// Predicate config is ignored when scaling is disabled.
fn test_invalid_predicate_without_scaling() {
    let factory = factory(VmConfig {
        scaling_enabled: None,
        overload_predicate: Some("DiskOverload".to_string()),
        ..scalable_config()
    });
    let vm = factory.create_scalable_vm().unwrap();
    assert_eq!(vm.id, 0);
    assert!(vm.horizontal_scaling().is_none());
}

#[test]
// Utilization is clamped to [0, 1].
fn test_utilization_clamped() {
    let vm = loaded_vm(1.5, -0.5);
    assert_eq!(vm.cpu_utilization(), 1.);
    assert_eq!(vm.memory_utilization(), 0.);
}
