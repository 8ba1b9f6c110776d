//! Shared handle over a single configuration store
//!
//! Every mutation takes the write lock for its whole duration, so concurrent
//! writers cannot race while creating intermediate objects.

use crate::config::store::ConfigStore;
use crate::types::Result;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Cheaply cloneable handle; clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<ConfigStore>>,
}

impl SharedConfig {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn init(&self, data: Value) -> Result<()> {
        self.inner.write().init(data)
    }

    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        self.inner.write().set(path, value)
    }

    pub fn write(&self, path: &str, value: Value) -> Result<()> {
        self.inner.write().write(path, value)
    }

    /// Owned copy of the value at `path`.
    pub fn read(&self, path: &str) -> Option<Value> {
        self.inner.read().read(path).cloned()
    }

    pub fn read_or(&self, path: &str, default: Value) -> Value {
        self.inner.read().read_or(path, default)
    }

    pub fn read_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.inner.read().read_as(path)
    }

    pub fn delete(&self, path: &str) -> Option<Value> {
        self.inner.write().delete(path)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn assign(&self, key: &str, value: Value) -> Result<()> {
        self.inner.write().assign(key, value)
    }

    pub fn is_immutable(&self, path: &str) -> bool {
        self.inner.read().is_immutable(path)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    pub fn snapshot(&self) -> Value {
        self.inner.read().snapshot()
    }

    /// Run `f` against the store under the read lock.
    ///
    /// The lock is held until `f` returns, so `f` must not call a mutating
    /// method on this handle or any clone of it; doing so deadlocks.
    pub fn with<R>(&self, f: impl FnOnce(&ConfigStore) -> R) -> R {
        f(&self.inner.read())
    }

    /// True if both handles point at the same store.
    pub fn ptr_eq(&self, other: &SharedConfig) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<ConfigStore> for SharedConfig {
    fn from(store: ConfigStore) -> Self {
        Self::new(store)
    }
}

static INSTANCE: OnceLock<SharedConfig> = OnceLock::new();

/// The process-wide configuration, created empty on first access.
///
/// Prefer constructing a [`SharedConfig`] at startup and passing it to
/// consumers; this accessor exists for call sites that cannot be reached
/// that way.
pub fn get_config() -> SharedConfig {
    INSTANCE
        .get_or_init(|| {
            debug!("Creating process-wide configuration");
            SharedConfig::default()
        })
        .clone()
}
