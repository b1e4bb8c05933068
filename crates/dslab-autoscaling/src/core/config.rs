//! Simulation and VM configuration.

pub mod options;
pub mod sim_config;
pub mod vm_config;

pub use options::{parse_config_value, parse_f64_option, parse_options};
pub use sim_config::SimulationConfig;
pub use vm_config::{VmConfig, VmResources};
