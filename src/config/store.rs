//! In-memory configuration tree addressed by dot paths
//!
//! Values installed with [`ConfigStore::set`] are immutable: a second `set`
//! on the same path is rejected. Values installed with
//! [`ConfigStore::write`] are mutable, and `write` may also replace a value
//! previously installed with `set`.

use crate::config::path::ConfigPath;
use crate::types::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

/// What a resolver walk is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Set,
    Write,
    Delete,
}

impl Intent {
    /// Whether missing intermediates are created and non-object ones rejected.
    fn creates(self) -> bool {
        matches!(self, Intent::Set | Intent::Write)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    /// The configuration tree
    pub(crate) tree: Map<String, Value>,

    /// Paths whose current value was installed by `set`
    pub(crate) sealed: HashSet<ConfigPath>,

    /// Members assigned through the façade that live outside the tree
    pub(crate) fields: Map<String, Value>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from `initial`.
    ///
    /// Anything other than a JSON object leaves the tree empty.
    pub fn from_value(initial: Value) -> Self {
        let tree = match initial {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            tree,
            ..Self::default()
        }
    }

    /// Replace the whole tree with the contents of `data`.
    pub fn init(&mut self, data: Value) -> Result<()> {
        let Value::Object(map) = data else {
            return Err(ConfigError::InvalidArgument(format!(
                "configuration initialized with invalid value: expected an object, got {}",
                kind_of(&data)
            )));
        };

        debug!("Initializing configuration with {} top-level keys", map.len());
        self.tree = map;
        self.sealed.clear();
        Ok(())
    }

    /// Install an immutable value at `path`.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let path = ConfigPath::parse(path)?;
        self.install(&path, value, Intent::Set)
    }

    /// Install a mutable value at `path`, replacing whatever was there.
    pub fn write(&mut self, path: &str, value: Value) -> Result<()> {
        let path = ConfigPath::parse(path)?;
        self.install(&path, value, Intent::Write)
    }

    /// Look up the value at `path`.
    ///
    /// Missing keys, `null` values, non-object intermediates and malformed
    /// paths all yield `None`.
    pub fn read(&self, path: &str) -> Option<&Value> {
        let path = ConfigPath::parse(path).ok()?;
        lookup(&self.tree, &path).filter(|v| !v.is_null())
    }

    /// Look up the value at `path`, falling back to `default`.
    ///
    /// Falsy values such as `0`, `false` and `""` are returned as stored.
    pub fn read_or(&self, path: &str, default: Value) -> Value {
        self.read(path).cloned().unwrap_or(default)
    }

    /// Look up the value at `path` and deserialize it into `T`.
    ///
    /// Returns `None` if the value is absent or has the wrong shape.
    pub fn read_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.read(path)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Remove the terminal key of `path`, returning the removed value.
    ///
    /// Intermediate objects are kept even if they become empty. A path that
    /// is malformed or does not resolve is a no-op.
    pub fn delete(&mut self, path: &str) -> Option<Value> {
        let path = ConfigPath::parse(path).ok()?;

        let removed = match resolve_parent(&mut self.tree, &path, Intent::Delete) {
            Ok(Some(parent)) => parent.remove(path.leaf()),
            _ => None,
        };
        if removed.is_some() {
            trace!("Deleted {}", path);
        }
        self.unseal(&path);
        removed
    }

    /// Remove every value from the tree.
    pub fn clear(&mut self) {
        debug!("Clearing configuration");
        self.tree = Map::new();
        self.sealed.clear();
    }

    /// Asynchronous counterpart of [`write`](Self::write).
    ///
    /// The in-memory store has nothing to persist, so this resolves
    /// immediately.
    pub async fn save(&mut self, path: &str, value: Value) -> Result<()> {
        self.write(path, value)
    }

    /// Asynchronous counterpart of [`read`](Self::read).
    pub async fn load(&self, path: &str, default: Option<Value>) -> Option<Value> {
        self.read(path).cloned().or(default)
    }

    /// Whether the value at `path` was installed with `set`.
    pub fn is_immutable(&self, path: &str) -> bool {
        ConfigPath::parse(path)
            .map(|p| self.sealed.contains(&p))
            .unwrap_or(false)
    }

    /// The tree as a JSON object.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.tree.clone())
    }

    /// Top-level keys of the tree.
    pub fn top_level_keys(&self) -> impl Iterator<Item = &str> {
        self.tree.keys().map(String::as_str)
    }

    fn install(&mut self, path: &ConfigPath, value: Value, intent: Intent) -> Result<()> {
        if intent == Intent::Set && self.sealed.contains(path) {
            return Err(ConfigError::ImmutableOverwrite(path.to_string()));
        }

        if let Some(parent) = resolve_parent(&mut self.tree, path, intent)? {
            parent.insert(path.leaf().to_string(), value);
        }
        trace!("{:?} {}", intent, path);

        self.unseal(path);
        if intent == Intent::Set {
            self.sealed.insert(path.clone());
        }
        Ok(())
    }

    /// Drop the immutability marks of `path` and everything below it.
    fn unseal(&mut self, path: &ConfigPath) {
        self.sealed.retain(|sealed| !sealed.starts_with(path));
    }
}

/// Walk the non-terminal segments of `path` and return the object that owns
/// the terminal key.
///
/// Creating intents build missing intermediates and fail on non-object ones.
/// Other intents return `Ok(None)` as soon as the walk cannot continue.
fn resolve_parent<'a>(
    root: &'a mut Map<String, Value>,
    path: &ConfigPath,
    intent: Intent,
) -> Result<Option<&'a mut Map<String, Value>>> {
    let mut cursor = root;

    for segment in path.parents() {
        match cursor.get(segment) {
            Some(Value::Object(_)) => {}
            None if intent.creates() => {
                cursor.insert(segment.clone(), Value::Object(Map::new()));
            }
            None => return Ok(None),
            Some(_) if intent.creates() => {
                return Err(ConfigError::NonObjectIntermediate {
                    segment: segment.clone(),
                    path: path.to_string(),
                });
            }
            Some(_) => return Ok(None),
        }

        cursor = match cursor.get_mut(segment) {
            Some(Value::Object(child)) => child,
            _ => return Ok(None),
        };
    }

    Ok(Some(cursor))
}

/// Read-only walk from `root` to the value at `path`.
fn lookup<'a>(root: &'a Map<String, Value>, path: &ConfigPath) -> Option<&'a Value> {
    let mut cursor = root;
    for segment in path.parents() {
        match cursor.get(segment)? {
            Value::Object(child) => cursor = child,
            _ => return None,
        }
    }
    cursor.get(path.leaf())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
