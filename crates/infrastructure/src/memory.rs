//! In-memory [`DocumentStore`] for tests and local development.
//!
//! Mirrors the DynamoDB behaviour the todos layer relies on: overwriting puts,
//! upserting updates, silent deletes of missing keys, and index queries sorted
//! by the index sort key. Nothing is persisted.

use crate::{DocumentStore, Item, StoreError, StoreResult};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    pub partition_key: String,
    pub sort_key: Option<String>,
}

impl IndexSchema {
    pub fn new(partition_key: &str, sort_key: Option<&str>) -> Self {
        Self {
            partition_key: partition_key.to_string(),
            sort_key: sort_key.map(str::to_string),
        }
    }
}

/// Key attributes of a table and its secondary indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub partition_key: String,
    pub sort_key: Option<String>,
    pub indexes: HashMap<String, IndexSchema>,
}

impl TableSchema {
    pub fn new(partition_key: &str, sort_key: Option<&str>) -> Self {
        Self {
            partition_key: partition_key.to_string(),
            sort_key: sort_key.map(str::to_string),
            indexes: HashMap::new(),
        }
    }

    pub fn with_index(mut self, name: &str, index: IndexSchema) -> Self {
        self.indexes.insert(name.to_string(), index);
        self
    }

    fn key_attributes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key.as_deref())
    }
}

type TableKey = Vec<String>;

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    items: BTreeMap<TableKey, Item>,
}

impl Table {
    /// Encodes the key attributes of `item` into an ordered map key.
    fn key_of(&self, operation: &'static str, item: &Item) -> StoreResult<TableKey> {
        self.schema
            .key_attributes()
            .map(|name| {
                let value = item.get(name).ok_or_else(|| {
                    StoreError::backend_message(
                        operation,
                        format!("One of the required keys was not given a value: {name}"),
                    )
                })?;
                encode_key_part(value).ok_or_else(|| {
                    StoreError::backend_message(
                        operation,
                        format!("Key attribute {name} must be of type S, N or B"),
                    )
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or empties and redefines) `name`.
    pub async fn create_table(&self, name: &str, schema: TableSchema) {
        let mut tables = self.tables.write().await;
        tables.insert(
            name.to_string(),
            Table {
                schema,
                items: BTreeMap::new(),
            },
        );
    }

    /// Number of items in `name`, or `None` if there is no such table.
    pub async fn item_count(&self, name: &str) -> Option<usize> {
        let tables = self.tables.read().await;
        tables.get(name).map(|table| table.items.len())
    }
}

fn no_table(operation: &'static str, table: &str) -> StoreError {
    StoreError::backend_message(
        operation,
        format!(
            "ResourceNotFoundException: Requested resource not found: Table: {table} not found"
        ),
    )
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table_data = tables
            .get_mut(table)
            .ok_or_else(|| no_table("PutItem", table))?;

        let key = table_data.key_of("PutItem", &item)?;
        table_data.items.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: Item) -> StoreResult<Option<Item>> {
        let tables = self.tables.read().await;
        let table_data = tables.get(table).ok_or_else(|| no_table("GetItem", table))?;

        let key = table_data.key_of("GetItem", &key)?;
        Ok(table_data.items.get(&key).cloned())
    }

    async fn query_index(
        &self,
        table: &str,
        index: &str,
        partition_key: &str,
        partition_value: AttributeValue,
    ) -> StoreResult<Vec<Item>> {
        let tables = self.tables.read().await;
        let table_data = tables.get(table).ok_or_else(|| no_table("Query", table))?;

        let index_schema = table_data.schema.indexes.get(index).ok_or_else(|| {
            StoreError::backend_message(
                "Query",
                format!(
                    "ValidationException: The table does not have the specified index: {index}"
                ),
            )
        })?;

        if index_schema.partition_key != partition_key {
            return Err(StoreError::backend_message(
                "Query",
                format!(
                    "ValidationException: Query condition missed key schema element: {}",
                    index_schema.partition_key
                ),
            ));
        }

        // Items without every index key attribute are not part of the index.
        let mut items: Vec<Item> = table_data
            .items
            .values()
            .filter(|item| item.get(partition_key) == Some(&partition_value))
            .filter(|item| {
                index_schema
                    .sort_key
                    .as_deref()
                    .map_or(true, |sort_key| item.contains_key(sort_key))
            })
            .cloned()
            .collect();

        if let Some(sort_key) = index_schema.sort_key.as_deref() {
            items.sort_by(|a, b| compare_sort_values(&a[sort_key], &b[sort_key]));
        }

        Ok(items)
    }

    async fn update_item(&self, table: &str, key: Item, changes: Item) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table_data = tables
            .get_mut(table)
            .ok_or_else(|| no_table("UpdateItem", table))?;

        if let Some(name) = table_data
            .schema
            .key_attributes()
            .find(|name| changes.contains_key(*name))
        {
            return Err(StoreError::backend_message(
                "UpdateItem",
                format!(
                    "ValidationException: Cannot update attribute {name}. \
                     This attribute is part of the key"
                ),
            ));
        }

        let encoded = table_data.key_of("UpdateItem", &key)?;
        table_data
            .items
            .entry(encoded)
            .or_insert(key)
            .extend(changes);
        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table_data = tables
            .get_mut(table)
            .ok_or_else(|| no_table("DeleteItem", table))?;

        let key = table_data.key_of("DeleteItem", &key)?;
        table_data.items.remove(&key);
        Ok(())
    }
}

fn encode_key_part(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::S(s) => Some(format!("S#{s}")),
        AttributeValue::N(n) => Some(format!("N#{n}")),
        AttributeValue::B(b) => Some(format!("B#{:?}", b.as_ref())),
        _ => None,
    }
}

/// Strings compare bytewise, numbers numerically, as DynamoDB sorts them.
fn compare_sort_values(a: &AttributeValue, b: &AttributeValue) -> Ordering {
    match (a, b) {
        (AttributeValue::S(a), AttributeValue::S(b)) => a.cmp(b),
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => a.cmp(b),
            }
        }
        _ => Ordering::Equal,
    }
}
