//! Asynchronous save/load surface
//!
//! A remote or on-disk store would implement [`ConfigBackend`]; the
//! in-memory [`SharedConfig`] resolves both calls without suspending.

use crate::config::handle::SharedConfig;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ConfigBackend: Send + Sync {
    /// Persist a mutable value at `path`.
    async fn save(&self, path: &str, value: Value) -> Result<()>;

    /// Fetch the value at `path`, or `default` if it is absent.
    async fn load(&self, path: &str, default: Option<Value>) -> Option<Value>;
}

#[async_trait]
impl ConfigBackend for SharedConfig {
    async fn save(&self, path: &str, value: Value) -> Result<()> {
        self.write(path, value)
    }

    async fn load(&self, path: &str, default: Option<Value>) -> Option<Value> {
        self.read(path).or(default)
    }
}
