use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

use dslab_autoscaling::core::config::VmConfig;
use dslab_autoscaling::core::context::{ComponentContext, SimClock};
use dslab_autoscaling::core::vm_factory::VmFactory;
use dslab_autoscaling::datacenter::Datacenter;

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn records_containing(expected_level: Level, text: &str) -> usize {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == expected_level && message.contains(text))
        .count()
}

fn scalable_config(scaling_type: &str) -> VmConfig {
    VmConfig {
        mips_capacity: Some(1000),
        pes: Some(1),
        ram: Some(1024),
        bandwidth: Some(100),
        storage: Some(1000),
        timezone: Some(0.),
        scaling_enabled: Some("yes".to_string()),
        scaling_type: Some(scaling_type.to_string()),
        ..Default::default()
    }
}

#[test]
// Unsupported scaling type falls back to horizontal scaling with a warning.
fn test_unsupported_scaling_type_fallback() {
    init_logger();
    let factory = VmFactory::new(
        scalable_config("vertical"),
        ComponentContext::new("vm_factory", SimClock::new()),
    );

    let vm = factory.create_scalable_vm().unwrap();
    let scaling = vm.horizontal_scaling().expect("fallback must attach horizontal scaling");
    let new_vm = scaling.supply_vm().unwrap();
    assert!(new_vm.id > vm.id);
    assert_eq!(records_containing(Level::Warn, "scaling type vertical is not implemented"), 1);
}

#[test]
fn test_supported_scaling_type_has_no_warning() {
    init_logger();
    let factory = VmFactory::new(
        scalable_config("horizontal"),
        ComponentContext::new("vm_factory", SimClock::new()),
    );

    let vm = factory.create_scalable_vm().unwrap();
    assert!(vm.horizontal_scaling().is_some());
    assert_eq!(records_containing(Level::Warn, "scaling type horizontal"), 0);
}

#[test]
// Placement is reported at info level together with the datacenter name.
fn test_placement_logged_with_datacenter() {
    init_logger();
    let clock = SimClock::new();
    let factory = VmFactory::new(
        scalable_config("horizontal"),
        ComponentContext::new("vm_factory", clock.clone()),
    );
    let mut datacenter = Datacenter::new(Some(1), ComponentContext::new("dc-placement", clock));

    let mut vm = factory.create_vm().unwrap();
    datacenter.place(&mut vm).unwrap();
    assert_eq!(vm.datacenter(), Some("dc-placement"));
    assert_eq!(records_containing(Level::Info, "placed VM #0 in datacenter dc-placement"), 1);

    let mut rejected = factory.create_vm().unwrap();
    assert!(datacenter.place(&mut rejected).is_err());
    assert_eq!(records_containing(Level::Info, "in datacenter dc-placement"), 1);
}
