//! Configuration and logging setup for flatten-imports

pub mod config;
pub mod logging;

pub use config::{ConfigOverrides, FlattenConfig, LogFormat, LoggingConfig};
