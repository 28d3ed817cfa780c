//! In-process key-value store.
//!
//! Clones share one map, so a test can keep a handle while the repository
//! worker owns another.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
