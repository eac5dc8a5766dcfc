use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use tracing::debug;

use crate::v1::datastore::{Item, RecordStore, StoreError};

/// `RecordStore` over a DynamoDB table. Every attribute is stored as `S`.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(Client::new(config))
    }
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

pub fn to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(k, v)| (k, AttributeValue::S(v)))
        .collect()
}

/// Non-string attributes have no place in a flat record and are dropped.
pub fn from_attributes(attributes: HashMap<String, AttributeValue>) -> Item {
    attributes
        .into_iter()
        .filter_map(|(k, v)| match v {
            AttributeValue::S(s) => Some((k, s)),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(to_attributes(item)))
            .send()
            .await
            .map_err(|e| StoreError::PutFail(format!("{:?}", e.into_source())))?;
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| StoreError::ScanFail(format!("{:?}", e.into_source())))?;
            debug!(table, count = output.count, "Scanned page");
            items.extend(
                output
                    .items
                    .unwrap_or_default()
                    .into_iter()
                    .map(from_attributes),
            );
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(items)
    }
}
