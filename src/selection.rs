//! The user's selected currency codes, persisted to durable storage.

use crate::core::storage::LocalStorage;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, error};

/// Storage key holding the JSON array of selected codes.
pub const SELECTION_KEY: &str = "exchangeConfig";

/// Ordered set of currency codes chosen by the user.
///
/// Every mutation that changes the sequence writes the full sequence back to
/// storage before returning.
pub struct SelectionStore {
    codes: Vec<String>,
    storage: Arc<dyn LocalStorage>,
}

impl SelectionStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        let mut store = Self {
            codes: Vec::new(),
            storage,
        };
        store.load();
        store
    }

    /// Replaces the current codes with the stored ones. A missing key leaves
    /// the state untouched; unreadable data is logged and ignored.
    pub fn load(&mut self) {
        match self.read_stored() {
            Ok(Some(codes)) => {
                debug!(count = codes.len(), "Loaded selected currencies");
                self.codes = codes;
            }
            Ok(None) => debug!("No saved currency selection"),
            Err(e) => error!(error = ?e, "Error loading currency selection from storage"),
        }
    }

    fn read_stored(&self) -> Result<Option<Vec<String>>> {
        let Some(saved) = self.storage.get_item(SELECTION_KEY)? else {
            return Ok(None);
        };
        let codes = serde_json::from_str(&saved)
            .with_context(|| format!("Invalid saved selection: '{saved}'"))?;
        Ok(Some(codes))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn add(&mut self, code: &str) {
        if self.is_selected(code) {
            return;
        }
        self.codes.push(code.to_string());
        self.persist();
    }

    pub fn remove(&mut self, code: &str) {
        let Some(index) = self.codes.iter().position(|c| c == code) else {
            return;
        };
        self.codes.remove(index);
        self.persist();
    }

    pub fn toggle(&mut self, code: &str) {
        if self.is_selected(code) {
            self.remove(code);
        } else {
            self.add(code);
        }
    }

    /// Replaces the whole sequence verbatim. Duplicates are kept.
    pub fn set_all(&mut self, codes: Vec<String>) {
        if self.codes == codes {
            return;
        }
        self.codes = codes;
        self.persist();
    }

    pub fn clear(&mut self) {
        if self.codes.is_empty() {
            return;
        }
        self.codes.clear();
        self.persist();
    }

    fn persist(&self) {
        let res: Result<()> = (|| {
            let value = serde_json::to_string(&self.codes)?;
            self.storage.set_item(SELECTION_KEY, &value)
        })();
        if let Err(e) = res {
            error!(error = ?e, "Error saving currency selection to storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;

    fn stored(storage: &MemoryStorage) -> Option<String> {
        storage.get_item(SELECTION_KEY).unwrap()
    }

    fn new_store() -> (Arc<MemoryStorage>, SelectionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SelectionStore::new(storage.clone());
        (storage, store)
    }

    struct FailingStorage;

    impl LocalStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow::anyhow!("disk unavailable"))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow::anyhow!("disk unavailable"))
        }
    }

    #[test]
    fn test_starts_empty_without_saved_data() {
        let (storage, store) = new_store();
        assert!(store.codes().is_empty());
        assert!(stored(&storage).is_none());
    }

    #[test]
    fn test_loads_saved_selection() {
        let storage = Arc::new(MemoryStorage::with_item(SELECTION_KEY, r#"["EUR","INR"]"#));
        let store = SelectionStore::new(storage);
        assert_eq!(store.codes(), ["EUR", "INR"]);
    }

    #[test]
    fn test_invalid_saved_data_is_ignored() {
        let storage = Arc::new(MemoryStorage::with_item(SELECTION_KEY, "not valid json"));
        let store = SelectionStore::new(storage);
        assert!(store.codes().is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_current_state() {
        let (storage, mut store) = new_store();
        store.add("USD");
        storage.set_item(SELECTION_KEY, "{broken").unwrap();

        store.load();
        assert_eq!(store.codes(), ["USD"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let (storage, mut store) = new_store();
        store.add("USD");
        store.add("EUR");
        store.add("USD");

        assert_eq!(store.codes(), ["USD", "EUR"]);
        assert_eq!(stored(&storage).as_deref(), Some(r#"["USD","EUR"]"#));
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let (_, mut store) = new_store();
        store.add("usd");
        store.add("USD");
        assert_eq!(store.codes(), ["usd", "USD"]);
        assert!(!store.is_selected("Usd"));
    }

    #[test]
    fn test_remove() {
        let (storage, mut store) = new_store();
        store.set_all(vec!["USD".into(), "EUR".into(), "INR".into()]);

        store.remove("EUR");
        assert_eq!(store.codes(), ["USD", "INR"]);
        assert_eq!(stored(&storage).as_deref(), Some(r#"["USD","INR"]"#));

        store.remove("XYZ");
        assert_eq!(store.codes(), ["USD", "INR"]);
    }

    #[test]
    fn test_is_selected_follows_add_and_remove() {
        let (_, mut store) = new_store();
        for code in ["USD", "EUR", "JPY"] {
            store.add(code);
            assert!(store.is_selected(code));
            store.remove(code);
            assert!(!store.is_selected(code));
        }
    }

    #[test]
    fn test_toggle_twice_restores_state_and_storage() {
        let (storage, mut store) = new_store();
        store.add("USD");
        let before = stored(&storage);

        store.toggle("EUR");
        assert_eq!(store.codes(), ["USD", "EUR"]);

        store.toggle("EUR");
        assert_eq!(store.codes(), ["USD"]);
        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn test_toggle_twice_moves_selected_code_to_end() {
        let (storage, mut store) = new_store();
        store.add("USD");
        store.add("EUR");

        store.toggle("USD");
        assert_eq!(store.codes(), ["EUR"]);

        store.toggle("USD");
        assert_eq!(store.codes(), ["EUR", "USD"]);
        assert!(store.is_selected("USD"));
        assert_eq!(stored(&storage).as_deref(), Some(r#"["EUR","USD"]"#));
    }

    #[test]
    fn test_mixed_operations_never_duplicate() {
        let (_, mut store) = new_store();
        let ops: [(&str, &str); 9] = [
            ("add", "USD"),
            ("toggle", "USD"),
            ("toggle", "USD"),
            ("add", "EUR"),
            ("add", "USD"),
            ("remove", "EUR"),
            ("toggle", "EUR"),
            ("toggle", "GBP"),
            ("add", "GBP"),
        ];
        for (op, code) in ops {
            match op {
                "add" => store.add(code),
                "remove" => store.remove(code),
                _ => store.toggle(code),
            }
        }

        assert_eq!(store.codes(), ["USD", "EUR", "GBP"]);
    }

    #[test]
    fn test_set_all_keeps_duplicates() {
        let (storage, mut store) = new_store();
        store.set_all(vec!["USD".into(), "USD".into()]);

        assert_eq!(store.codes(), ["USD", "USD"]);
        assert_eq!(stored(&storage).as_deref(), Some(r#"["USD","USD"]"#));
    }

    #[test]
    fn test_clear() {
        let (storage, mut store) = new_store();
        store.add("USD");
        store.clear();

        assert!(store.codes().is_empty());
        assert_eq!(stored(&storage).as_deref(), Some("[]"));
    }

    #[test]
    fn test_selection_survives_restart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = SelectionStore::new(storage.clone());
            store.add("EUR");
            store.add("INR");
        }

        let store = SelectionStore::new(storage);
        assert_eq!(store.codes(), ["EUR", "INR"]);
    }

    #[test]
    fn test_storage_failures_are_not_fatal() {
        let mut store = SelectionStore::new(Arc::new(FailingStorage));
        assert!(store.codes().is_empty());

        store.add("USD");
        assert!(store.is_selected("USD"));
        store.toggle("USD");
        assert!(!store.is_selected("USD"));
    }
}
