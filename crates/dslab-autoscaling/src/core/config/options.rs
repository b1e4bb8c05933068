//! Config utils.

use std::collections::HashMap;

use crate::core::error::ConfigurationError;

/// Parses config value string, which consists of two parts - name and options.
/// Example: MemoryOverload[threshold=0.8] parts are name MemoryOverload and options string "threshold=0.8".
pub fn parse_config_value(config_str: &str) -> (String, Option<String>) {
    match config_str.split_once('[') {
        Some((l, r)) => (l.trim().to_string(), Some(r.replace(']', ""))),
        None => (config_str.trim().to_string(), None),
    }
}

/// Parses options string from config value, returns map with option names and values.
///
/// # Examples
///
/// ```rust
/// use dslab_autoscaling::core::config::options::parse_options;
///
/// let options = parse_options("threshold=0.8,other=something");
/// assert_eq!(options.get("threshold").unwrap(), "0.8");
/// assert_eq!(options.get("other").unwrap(), "something");
/// assert_eq!(options.get("missing"), None);
/// ```
pub fn parse_options(options_str: &str) -> HashMap<String, String> {
    let mut options = HashMap::new();
    for option_str in options_str.split(',') {
        if let Some((name, value)) = option_str.split_once('=') {
            options.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
    options
}

/// Reads a float option, returns `default` if the option is absent.
pub fn parse_f64_option(
    options: &HashMap<String, String>,
    name: &str,
    default: f64,
) -> Result<f64, ConfigurationError> {
    match options.get(name) {
        None => Ok(default),
        Some(value) => value.parse::<f64>().map_err(|_| ConfigurationError::InvalidOption {
            option: name.to_string(),
            value: value.clone(),
        }),
    }
}
