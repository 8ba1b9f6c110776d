//! Built-in default configuration
//!
//! These values apply when no user file overrides them

use serde_json::{json, Map, Value};

pub const THEME_DEFAULT_MODE: &str = "dark";
pub const DRAWER_DEFAULT_WIDTH: u32 = 300;
pub const ALLOWED_ATTEMPTS: u32 = 1;

pub fn get_default_config() -> Map<String, Value> {
    let mut config = Map::new();

    config.insert("theme".to_string(), theme_config());
    config.insert("drawer".to_string(), drawer_config());
    config.insert("bootstrap".to_string(), bootstrap_config());

    config
}

fn theme_config() -> Value {
    json!({ "mode": THEME_DEFAULT_MODE })
}

fn drawer_config() -> Value {
    json!({ "width": DRAWER_DEFAULT_WIDTH })
}

fn bootstrap_config() -> Value {
    json!({ "allowed_attempts": ALLOWED_ATTEMPTS })
}
