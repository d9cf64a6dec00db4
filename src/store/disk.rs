use crate::core::storage::LocalStorage;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "local_storage";

/// Durable storage backed by a fjall keyspace partition.
pub struct DiskStorage {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStorage {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open storage partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl LocalStorage for DiskStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.partition.get(key)? else {
            debug!("Storage MISS for key: {}", key);
            return Ok(None);
        };
        debug!("Storage HIT for key: {}", key);
        let value = String::from_utf8(value.to_vec())
            .with_context(|| format!("Stored value for {key} is not valid UTF-8"))?;
        Ok(Some(value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        // Writes must be on disk before the caller moves on.
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Storage PUT for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_storage_get_set() {
        let dir = tempdir().unwrap();
        let storage = DiskStorage::open(dir.path()).unwrap();

        assert!(storage.get_item("key1").unwrap().is_none());

        storage.set_item("key1", "[\"USD\"]").unwrap();
        assert_eq!(storage.get_item("key1").unwrap().as_deref(), Some("[\"USD\"]"));

        storage.set_item("key1", "[]").unwrap();
        assert_eq!(storage.get_item("key1").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_disk_storage_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = DiskStorage::open(dir.path()).unwrap();
            storage.set_item("exchangeConfig", "[\"EUR\",\"INR\"]").unwrap();
        }

        let storage = DiskStorage::open(dir.path()).unwrap();
        assert_eq!(
            storage.get_item("exchangeConfig").unwrap().as_deref(),
            Some("[\"EUR\",\"INR\"]")
        );
    }
}
