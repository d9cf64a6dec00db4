use crate::core::storage::LocalStorage;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// In-memory storage, lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with a single entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.inner.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Memory storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Memory storage lock poisoned"))?;
        debug!("Storage PUT for key: {}", key);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
