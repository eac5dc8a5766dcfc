use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// A flat record: attribute name to string value.
pub type Item = HashMap<String, String>;

/// Key-value table backend the handlers write to and scan from.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;
    /// Every item currently in `table`, in whatever order the backend yields.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Put item failed: {0}")]
    PutFail(String),
    #[error("Scan failed: {0}")]
    ScanFail(String),
}
