use crate::StoreResult;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// One document, or the key of one, as attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Point reads and writes plus index queries against a document store.
///
/// Every method is exactly one request to the store. Implementations must be
/// safe to share between concurrent callers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `item`, replacing any item with the same key.
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()>;

    async fn get_item(&self, table: &str, key: Item) -> StoreResult<Option<Item>>;

    /// Returns every item of `index` whose `partition_key` equals
    /// `partition_value`, in the index's ascending sort order.
    async fn query_index(
        &self,
        table: &str,
        index: &str,
        partition_key: &str,
        partition_value: AttributeValue,
    ) -> StoreResult<Vec<Item>>;

    /// Sets each attribute in `changes` on the item at `key`. Attributes not
    /// named in `changes` are left alone.
    async fn update_item(&self, table: &str, key: Item, changes: Item) -> StoreResult<()>;

    /// Removes the item at `key`. Removing a missing item is not an error.
    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()>;
}
