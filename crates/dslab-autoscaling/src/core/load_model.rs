//! Resource load models.

use dyn_clone::{clone_trait_object, DynClone};

use crate::core::config::{parse_config_value, parse_f64_option, parse_options};
use crate::core::error::ConfigurationError;

/// A resource load model is a function, which defines the fraction of resource X used by VM at the moment.
/// time - current simulation time, time_from_start - time since the VM was started,
/// which allows to model load growth during VM lifecycle.
pub trait LoadModel: DynClone {
    fn get_resource_load(&self, time: f64, time_from_start: f64) -> f64;
}

clone_trait_object!(LoadModel);

/// Builds load model from config string such as `ConstLoadModel[load=0.8]`.
pub fn load_model_resolver(config_str: &str) -> Result<Box<dyn LoadModel>, ConfigurationError> {
    let (model_name, options) = parse_config_value(config_str);
    let options = parse_options(&options.unwrap_or_default());
    match model_name.as_str() {
        "ConstLoadModel" => Ok(Box::new(ConstLoadModel::new(parse_f64_option(&options, "load", 0.)?))),
        "RampLoadModel" => Ok(Box::new(RampLoadModel::new(
            parse_f64_option(&options, "initial", 0.)?,
            parse_f64_option(&options, "rate", 0.)?,
        ))),
        _ => Err(ConfigurationError::UnknownModel {
            kind: "load model",
            name: model_name,
        }),
    }
}

/// The simplest load model, the constant load.
#[derive(Clone)]
pub struct ConstLoadModel {
    load: f64,
}

impl ConstLoadModel {
    pub fn new(load: f64) -> Self {
        Self { load }
    }
}

impl LoadModel for ConstLoadModel {
    fn get_resource_load(&self, _time: f64, _time_from_start: f64) -> f64 {
        self.load
    }
}

/// Load growing linearly from `initial` by `rate` per second since VM start.
#[derive(Clone)]
pub struct RampLoadModel {
    initial: f64,
    rate: f64,
}

impl RampLoadModel {
    pub fn new(initial: f64, rate: f64) -> Self {
        Self { initial, rate }
    }
}

impl LoadModel for RampLoadModel {
    fn get_resource_load(&self, _time: f64, time_from_start: f64) -> f64 {
        self.initial + self.rate * time_from_start.max(0.)
    }
}
