//! Concrete adapter implementations for ports, plus process-wide logging.

pub mod logging;
pub mod subprocess_adapter;
pub mod yaml_config_adapter;
