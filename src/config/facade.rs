//! Property-style access to top-level configuration keys
//!
//! Top-level tree keys can be read and assigned as if they were members of
//! the store. Method names are reserved and always refer to the store's own
//! operations; keys starting with `_` live in a separate field namespace
//! that never touches the tree.

use crate::config::store::ConfigStore;
use crate::types::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::ops::Index;
use tracing::trace;

/// Member names that always resolve to store operations.
pub const RESERVED_METHODS: &[&str] = &[
    "init", "set", "read", "write", "delete", "clear", "load", "save",
];

/// Keys with this prefix are stored outside the tree.
pub const RESERVED_PREFIX: char = '_';

static NULL: Value = Value::Null;

/// What a façade key resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Property<'a> {
    /// One of the store's own operations
    Method(&'static str),
    /// A top-level value in the configuration tree
    Entry(&'a Value),
    /// A member in the store's own field namespace
    Field(&'a Value),
}

fn reserved_method(key: &str) -> Option<&'static str> {
    RESERVED_METHODS.iter().copied().find(|m| *m == key)
}

impl ConfigStore {
    /// Resolve `key` the way a member access on the store would.
    ///
    /// Dotted keys are never resolved here; use [`read`](Self::read).
    pub fn property(&self, key: &str) -> Option<Property<'_>> {
        if key.contains('.') {
            return None;
        }
        if let Some(method) = reserved_method(key) {
            return Some(Property::Method(method));
        }
        if !key.starts_with(RESERVED_PREFIX) {
            if let Some(value) = self.tree.get(key).filter(|v| !v.is_null()) {
                return Some(Property::Entry(value));
            }
        }
        self.fields.get(key).map(Property::Field)
    }

    /// Assign `value` to `key` the way a member assignment on the store would.
    ///
    /// Plain keys become top-level tree entries, as with
    /// [`write`](Self::write), except that a key installed with
    /// [`set`](Self::set) is rejected.
    pub fn assign(&mut self, key: &str, value: Value) -> Result<()> {
        if key.is_empty() || key.contains('.') {
            return Err(ConfigError::InvalidPath(format!(
                "'{}' is not a plain member name; use write() for dotted paths",
                key
            )));
        }
        if reserved_method(key).is_some() {
            return Err(ConfigError::ReservedKey(key.to_string()));
        }
        if key.starts_with(RESERVED_PREFIX) {
            trace!("Assigning own field {}", key);
            self.fields.insert(key.to_string(), value);
            return Ok(());
        }
        if self.is_immutable(key) {
            return Err(ConfigError::ImmutableOverwrite(key.to_string()));
        }
        self.write(key, value)
    }

    /// Every member name: reserved methods, own fields, then tree keys.
    pub fn keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        RESERVED_METHODS
            .iter()
            .copied()
            .chain(self.fields.keys().map(String::as_str))
            .chain(self.top_level_keys())
            .filter(|k| seen.insert(*k))
            .map(str::to_string)
            .collect()
    }
}

/// `store["key"]` reads a top-level tree entry, yielding `Value::Null` when
/// the key is absent, reserved, or dotted.
impl Index<&str> for ConfigStore {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.property(key) {
            Some(Property::Entry(value)) => value,
            _ => &NULL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_reads_top_level_entry() {
        let mut store = ConfigStore::new();
        store.write("x", json!(5)).unwrap();
        assert_eq!(store.property("x"), Some(Property::Entry(&json!(5))));
        assert_eq!(store["x"], json!(5));
    }

    #[test]
    fn test_assign_writes_top_level() {
        let mut store = ConfigStore::new();
        store.assign("feature_x", json!(true)).unwrap();
        assert_eq!(store.read("feature_x"), Some(&json!(true)));

        store.assign("feature_x", json!(false)).unwrap();
        assert_eq!(store["feature_x"], json!(false));
    }

    #[test]
    fn test_methods_cannot_be_shadowed() {
        let mut store = ConfigStore::new();
        store.init(json!({"read": "tree value"})).unwrap();

        assert_eq!(store.property("read"), Some(Property::Method("read")));
        assert_eq!(store["read"], Value::Null);
        // Still reachable through the path API
        assert_eq!(store.read("read"), Some(&json!("tree value")));
    }

    #[test]
    fn test_assign_to_method_rejected() {
        let mut store = ConfigStore::new();
        for name in RESERVED_METHODS {
            let result = store.assign(name, json!(1));
            assert!(matches!(result, Err(ConfigError::ReservedKey(ref k)) if k == name));
        }
        assert_eq!(store.snapshot(), json!({}));
        assert!(store.fields.is_empty());
    }

    #[test]
    fn test_prefixed_keys_use_field_namespace() {
        let mut store = ConfigStore::new();
        store.assign("_internal", json!("hidden")).unwrap();

        assert_eq!(store.read("_internal"), None);
        assert_eq!(store.property("_internal"), Some(Property::Field(&json!("hidden"))));
        assert_eq!(store["_internal"], Value::Null);

        store.clear();
        assert_eq!(store.property("_internal"), Some(Property::Field(&json!("hidden"))));
    }

    #[test]
    fn test_dotted_keys_excluded() {
        let mut store = ConfigStore::new();
        store.write("a.b", json!(1)).unwrap();

        assert_eq!(store.property("a.b"), None);
        assert_eq!(store["a.b"], Value::Null);
        assert!(matches!(
            store.assign("a.b", json!(2)),
            Err(ConfigError::InvalidPath(_))
        ));
        assert_eq!(store.read("a.b"), Some(&json!(1)));
    }

    #[test]
    fn test_assign_respects_immutability() {
        let mut store = ConfigStore::new();
        store.set("locked", json!(1)).unwrap();

        assert!(matches!(
            store.assign("locked", json!(2)),
            Err(ConfigError::ImmutableOverwrite(_))
        ));
        assert_eq!(store["locked"], json!(1));
    }

    #[test]
    fn test_null_entry_reads_as_absent() {
        let mut store = ConfigStore::new();
        store.write("cleared", Value::Null).unwrap();

        assert_eq!(store.read("cleared"), None);
        assert_eq!(store.property("cleared"), None);
        assert_eq!(store["cleared"], Value::Null);
    }

    #[test]
    fn test_missing_key() {
        let store = ConfigStore::new();
        assert_eq!(store.property("nothing"), None);
        assert_eq!(store["nothing"], Value::Null);
    }

    #[test]
    fn test_keys_union() {
        let mut store = ConfigStore::new();
        store.init(json!({"theme": {}, "set": 1})).unwrap();
        store.assign("_cache", json!([])).unwrap();

        let keys = store.keys();
        let expected: Vec<String> = RESERVED_METHODS
            .iter()
            .map(|m| m.to_string())
            .chain(["_cache".to_string(), "theme".to_string()])
            .collect();
        assert_eq!(keys, expected);
    }
}
