//! Durable string key-value storage used to persist local settings

use anyhow::Result;

/// A small, synchronous key-value store that survives process restarts.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}
