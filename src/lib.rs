//! WebUI configuration
//!
//! This crate provides the path-addressable configuration store shared by
//! the WebUI application: dot-path get/set/write/delete over a nested JSON
//! tree, with set-once entries and property-style access to top-level keys.

pub mod config;
pub mod types;
pub mod utils;

pub use config::{get_config, ConfigBackend, ConfigLoader, ConfigPath, ConfigStore, SharedConfig};
pub use types::ConfigError;
