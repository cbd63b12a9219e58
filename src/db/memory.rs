use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::{DatabaseError, KeyValueStore};

/// In-process store. Nothing survives the value being dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held. Still answers after a writer panicked.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, DatabaseError> {
        let entries = self.entries.read().map_err(|_| DatabaseError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), DatabaseError> {
        let mut entries = self.entries.write().map_err(|_| DatabaseError::LockPoisoned)?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        let mut entries = self.entries.write().map_err(|_| DatabaseError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("healthRecords").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("k", &json!({"v": 1})).unwrap();
        store.set("k", &json!({"v": 2})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"v": 2})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn poisoned_lock_still_reports_len() {
        let store = std::sync::Arc::new(MemoryStore::new());
        store.set("k", &json!(1)).unwrap();

        let writer = std::sync::Arc::clone(&store);
        let result = std::thread::spawn(move || {
            let _guard = writer.entries.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert!(matches!(store.get("k"), Err(DatabaseError::LockPoisoned)));
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("nothing").unwrap();
        store.set("k", &json!(1)).unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
