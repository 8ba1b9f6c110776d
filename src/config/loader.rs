//! Configuration loader with 2-tier precedence
//!
//! Priority order (highest to lowest):
//! 1. User config (.webui.toml, .webui.json, $WEBUI_CONFIG or
//!    ~/.config/webui/config.toml)
//! 2. Built-in defaults
//!
//! The user file is deep-merged over the defaults, so a file only needs to
//! name the keys it changes.

use crate::config::{get_default_config, ConfigStore};
use crate::types::{ConfigError, Result};
use crate::utils::is_struct;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "WEBUI_CONFIG";

pub struct ConfigLoader {
    defaults: Map<String, Value>,
    user_config: Option<(PathBuf, Map<String, Value>)>,
}

impl ConfigLoader {
    /// Load the defaults and the first user file found in the standard
    /// locations.
    pub fn new() -> Result<Self> {
        let defaults = get_default_config();
        debug!("Loaded {} default configuration keys", defaults.len());

        let user_config = Self::load_user_config()?;

        Ok(Self {
            defaults,
            user_config,
        })
    }

    /// Load the defaults and an explicit user file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            defaults: get_default_config(),
            user_config: Some((path.to_path_buf(), Self::read_file(path)?)),
        })
    }

    /// Drop the built-in defaults.
    pub fn without_defaults(mut self) -> Self {
        self.defaults = Map::new();
        self
    }

    fn candidates() -> Vec<PathBuf> {
        // Try multiple locations in priority order:
        // 1. ./.webui.toml, ./.webui.json (project-specific)
        // 2. $WEBUI_CONFIG (environment variable)
        // 3. ~/.config/webui/config.toml (user-global)

        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".webui.toml"));
            candidates.push(cwd.join(".webui.json"));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(config_path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("webui").join("config.toml"));
        }

        candidates
    }

    fn load_user_config() -> Result<Option<(PathBuf, Map<String, Value>)>> {
        for path in Self::candidates() {
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok(Some((path, config)));
            }
        }

        debug!("No user config file found");
        Ok(None)
    }

    /// Parse a TOML or JSON file (by extension) into a configuration tree.
    pub fn read_file(path: &Path) -> Result<Map<String, Value>> {
        debug!("Loading user config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let value: Value = if is_json {
            serde_json::from_str(&content)?
        } else {
            let table: toml::Table = toml::from_str(&content)?;
            toml_to_json(toml::Value::Table(table))
        };

        match value {
            Value::Object(map) => {
                info!("Loaded user configuration from {}", path.display());
                Ok(map)
            }
            other => Err(ConfigError::Load(format!(
                "{} must contain a table at the top level, found {}",
                path.display(),
                if is_struct(&other) { "an array" } else { "a scalar" }
            ))),
        }
    }

    /// Path of the user file that was loaded, if any.
    pub fn source(&self) -> Option<&Path> {
        self.user_config.as_ref().map(|(path, _)| path.as_path())
    }

    /// The defaults with the user file merged on top.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.defaults.clone();
        if let Some((_, user)) = &self.user_config {
            merge_into(&mut merged, user);
        }
        merged
    }

    /// Build a store seeded with the merged configuration.
    pub fn into_store(self) -> Result<ConfigStore> {
        let mut store = ConfigStore::new();
        store.init(Value::Object(self.merged()))?;
        Ok(store)
    }
}

/// Convert a TOML value into the JSON tree representation.
///
/// Datetimes become their RFC 3339 string form. Non-finite floats have no
/// JSON form and become `null`.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Recursively merge `overlay` into `base`. Objects merge key by key; any
/// other value in `overlay` replaces the one in `base`.
fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (base.get_mut(key), value) {
            merge_into(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}
