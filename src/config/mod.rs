//! Configuration system for WebUI
//!
//! A single in-memory tree addressed by dot paths, with:
//! 1. Immutable (`set`) and mutable (`write`) entries
//! 2. Property-style access to top-level keys
//! 3. A lock-serialized shared handle and process-wide accessor
//! 4. Seeding from built-in defaults and a user file

mod backend;
mod defaults;
mod facade;
mod handle;
mod loader;
mod path;
mod store;

pub use backend::ConfigBackend;
pub use defaults::{get_default_config, ALLOWED_ATTEMPTS, DRAWER_DEFAULT_WIDTH, THEME_DEFAULT_MODE};
pub use facade::{Property, RESERVED_METHODS, RESERVED_PREFIX};
pub use handle::{get_config, SharedConfig};
pub use loader::{ConfigLoader, CONFIG_ENV_VAR};
pub use path::ConfigPath;
pub use store::ConfigStore;
