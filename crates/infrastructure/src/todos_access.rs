use crate::{
    is_todo_record, item_to_todo, models::attr, todo_key, todo_to_item, update_to_changes,
    DocumentStore, DynamoDbStore, StoreResult,
};
use aws_sdk_dynamodb::types::AttributeValue;
use domain::{TodoItem, TodoUpdate};
use shared::Config;
use std::sync::Arc;
use tracing::{debug, info};

/// Table and index the todos live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosAccessConfig {
    pub table_name: String,
    /// Index keyed by `userId` and sorted by `createdAt`.
    pub index_name: String,
}

impl From<&Config> for TodosAccessConfig {
    fn from(config: &Config) -> Self {
        Self {
            table_name: config.todos_table.clone(),
            index_name: config.todos_created_at_index.clone(),
        }
    }
}

/// Data access for todo items.
///
/// Each method is a single store request. Nothing is validated, retried or
/// cached, and store failures are returned as they are.
#[derive(Clone)]
pub struct TodosAccess {
    store: Arc<dyn DocumentStore>,
    config: TodosAccessConfig,
}

impl TodosAccess {
    pub fn new(store: Arc<dyn DocumentStore>, config: TodosAccessConfig) -> Self {
        Self { store, config }
    }

    /// DynamoDB-backed access using the table, index and endpoint in `config`.
    pub async fn from_config(config: &Config) -> Self {
        let store = DynamoDbStore::from_config(config).await;
        Self::new(Arc::new(store), TodosAccessConfig::from(config))
    }

    pub fn config(&self) -> &TodosAccessConfig {
        &self.config
    }

    /// Writes `todo` as given, overwriting any item with the same key.
    pub async fn create_todo_item(&self, todo: TodoItem) -> StoreResult<TodoItem> {
        info!(todo = ?todo, "Creating new todo");

        self.store
            .put_item(&self.config.table_name, todo_to_item(&todo))
            .await?;

        Ok(todo)
    }

    /// All todos of `user_id`, oldest first.
    pub async fn get_all_todos(&self, user_id: &str) -> StoreResult<Vec<TodoItem>> {
        info!(user_id, "Getting all todos");

        let items = self
            .store
            .query_index(
                &self.config.table_name,
                &self.config.index_name,
                attr::USER_ID,
                AttributeValue::S(user_id.to_string()),
            )
            .await?;

        items.iter().map(item_to_todo).collect()
    }

    /// Point read. An item holding only what an update on a missing key wrote
    /// is reported as no todo, matching what [`Self::get_all_todos`] sees.
    pub async fn get_todo_item(
        &self,
        todo_id: &str,
        user_id: &str,
    ) -> StoreResult<Option<TodoItem>> {
        info!(todo_id, user_id, "Getting todo");

        let item = self
            .store
            .get_item(&self.config.table_name, todo_key(todo_id, user_id))
            .await?;

        match item {
            Some(item) if is_todo_record(&item) => item_to_todo(&item).map(Some),
            Some(_) => {
                debug!(todo_id, user_id, "Ignoring partial item left by an update");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Replaces name, due date and done flag.
    ///
    /// Returns `update` itself, not the stored item. There is no existence
    /// check, so updating a missing key behaves however the store does.
    pub async fn update_todo_item(
        &self,
        todo_id: &str,
        user_id: &str,
        update: TodoUpdate,
    ) -> StoreResult<TodoUpdate> {
        info!(todo_id, user_id, update = ?update, "Updating todo");

        self.store
            .update_item(
                &self.config.table_name,
                todo_key(todo_id, user_id),
                update_to_changes(&update),
            )
            .await?;

        Ok(update)
    }

    /// Deletes the todo and echoes back `todo_id`. The attachment it points
    /// to is not touched.
    pub async fn delete_todo_item(&self, todo_id: &str, user_id: &str) -> StoreResult<String> {
        info!(todo_id, user_id, "Removing todo");

        self.store
            .delete_item(&self.config.table_name, todo_key(todo_id, user_id))
            .await?;

        Ok(todo_id.to_string())
    }

    pub async fn update_todo_attachment_url(
        &self,
        todo_id: &str,
        user_id: &str,
        attachment_url: &str,
    ) -> StoreResult<()> {
        info!(todo_id, user_id, attachment_url, "Updating todo attachment");

        let changes = [(
            attr::ATTACHMENT_URL.to_string(),
            AttributeValue::S(attachment_url.to_string()),
        )]
        .into_iter()
        .collect();

        self.store
            .update_item(
                &self.config.table_name,
                todo_key(todo_id, user_id),
                changes,
            )
            .await
    }
}
