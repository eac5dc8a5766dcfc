use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::v1::datastore::{Item, RecordStore, StoreError};

/// In-process store keyed by table name. Insertion order is kept per table.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Item>>>,
    fail_puts: bool,
    fail_scans: bool,
    calls: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }
    pub fn failing_scans(mut self) -> Self {
        self.fail_scans = true;
        self
    }
    pub fn with_items(self, table: &str, items: Vec<Item>) -> Self {
        self.lock().insert(table.to_string(), items);
        self
    }
    pub fn items(&self, table: &str) -> Vec<Item> {
        self.lock().get(table).cloned().unwrap_or_default()
    }
    /// Number of put and scan calls made, failed ones included.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Item>>> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
    fn count_call(&self) {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.count_call();
        if self.fail_puts {
            return Err(StoreError::PutFail(format!("table {table} unavailable")));
        }
        self.lock().entry(table.to_string()).or_default().push(item);
        Ok(())
    }
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        self.count_call();
        if self.fail_scans {
            return Err(StoreError::ScanFail(format!("table {table} unavailable")));
        }
        Ok(self.items(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str) -> Item {
        Item::from([("PrimaryKey".to_string(), key.to_string())])
    }

    #[tokio::test]
    async fn put_then_scan() {
        let store = MemoryStore::new();
        store.put("comments", item("a")).await.unwrap();
        store.put("comments", item("b")).await.unwrap();
        store.put("other", item("c")).await.unwrap();
        assert_eq!(store.scan("comments").await.unwrap().len(), 2);
        assert_eq!(store.calls(), 4);
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = MemoryStore::new().failing_puts().failing_scans();
        assert!(matches!(
            store.put("t", item("a")).await,
            Err(StoreError::PutFail(_))
        ));
        assert!(matches!(store.scan("t").await, Err(StoreError::ScanFail(_))));
        assert!(store.items("t").is_empty());
    }
}
