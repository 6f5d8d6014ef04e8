use crate::{DocumentStore, Item, StoreError, StoreResult};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use shared::Config;
use std::collections::HashMap;
use tracing::debug;

/// [`DocumentStore`] backed by Amazon DynamoDB.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loads AWS credentials the usual way, with the region and optional
    /// endpoint override taken from `config`.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.dynamodb_endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl DocumentStore for DynamoDbStore {
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::backend("PutItem", e))?;

        Ok(())
    }

    async fn get_item(&self, table: &str, key: Item) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| StoreError::backend("GetItem", e))?;

        Ok(output.item)
    }

    async fn query_index(
        &self,
        table: &str,
        index: &str,
        partition_key: &str,
        partition_value: AttributeValue,
    ) -> StoreResult<Vec<Item>> {
        let output = self
            .client
            .query()
            .table_name(table)
            .index_name(index)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", partition_key)
            .expression_attribute_values(":pk", partition_value)
            .send()
            .await
            .map_err(|e| StoreError::backend("Query", e))?;

        if output.last_evaluated_key.is_some() {
            debug!(table, index, "query result truncated by DynamoDB page limit");
        }

        Ok(output.items.unwrap_or_default())
    }

    async fn update_item(&self, table: &str, key: Item, changes: Item) -> StoreResult<()> {
        let (expression, names, values) = build_set_expression(changes);

        self.client
            .update_item()
            .table_name(table)
            .set_key(Some(key))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(|e| StoreError::backend("UpdateItem", e))?;

        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| StoreError::backend("DeleteItem", e))?;

        Ok(())
    }
}

/// Builds `SET #a0 = :v0, #a1 = :v1, ...` with every attribute name behind a
/// placeholder, so reserved words such as `name` need no special casing.
/// Attributes are numbered in name order.
fn build_set_expression(
    changes: Item,
) -> (
    String,
    HashMap<String, String>,
    HashMap<String, AttributeValue>,
) {
    let mut changes: Vec<_> = changes.into_iter().collect();
    changes.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut clauses = Vec::with_capacity(changes.len());
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (i, (attribute, value)) in changes.into_iter().enumerate() {
        clauses.push(format!("#a{i} = :v{i}"));
        names.insert(format!("#a{i}"), attribute);
        values.insert(format!(":v{i}"), value);
    }

    (format!("SET {}", clauses.join(", ")), names, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_expression_uses_placeholders_in_name_order() {
        let changes = Item::from([
            ("name".to_string(), AttributeValue::S("Buy milk".to_string())),
            ("done".to_string(), AttributeValue::Bool(true)),
            ("dueDate".to_string(), AttributeValue::S("2024-01-02".to_string())),
        ]);

        let (expression, names, values) = build_set_expression(changes);

        assert_eq!(expression, "SET #a0 = :v0, #a1 = :v1, #a2 = :v2");
        assert_eq!(names["#a0"], "done");
        assert_eq!(names["#a1"], "dueDate");
        assert_eq!(names["#a2"], "name");
        assert_eq!(values[":v0"], AttributeValue::Bool(true));
        assert_eq!(values[":v2"], AttributeValue::S("Buy milk".to_string()));
    }

    #[test]
    fn test_set_expression_single_attribute() {
        let changes = Item::from([(
            "attachmentUrl".to_string(),
            AttributeValue::S("https://example.com/a.png".to_string()),
        )]);

        let (expression, names, values) = build_set_expression(changes);

        assert_eq!(expression, "SET #a0 = :v0");
        assert_eq!(names.len(), 1);
        assert_eq!(values.len(), 1);
    }
}
