//! Configuration file handling
//!
//! The configuration is a small TOML file (`aspm.toml`) tuning how the engine reads
//! SSC records. Every key has a default taken from the embedded `default_config.toml`,
//! so an absent file is equivalent to the defaults.

#[expect(clippy::module_inception, reason = "config module contains the Config type")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
