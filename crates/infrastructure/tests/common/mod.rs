#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use domain::{TodoItem, TodoUpdate};
use infrastructure::{todos_table_schema, InMemoryStore, TodosAccess, TodosAccessConfig};
use std::sync::Arc;

pub const TABLE: &str = "Todos-test";
pub const INDEX: &str = "CreatedAtIndex";

pub fn access_config() -> TodosAccessConfig {
    TodosAccessConfig {
        table_name: TABLE.to_string(),
        index_name: INDEX.to_string(),
    }
}

/// `TodosAccess` over a fresh in-memory todos table. The store is returned too
/// so tests can inspect it directly.
pub async fn in_memory_access() -> (TodosAccess, InMemoryStore) {
    let store = InMemoryStore::new();
    store.create_table(TABLE, todos_table_schema(INDEX)).await;
    let access = TodosAccess::new(Arc::new(store.clone()), access_config());
    (access, store)
}

pub fn new_todo_id() -> String {
    ulid::Ulid::new().to_string()
}

/// A todo created `minutes` after a fixed base time.
pub fn todo_at(user_id: &str, name: &str, minutes: i64) -> TodoItem {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    TodoItem {
        user_id: user_id.to_string(),
        todo_id: new_todo_id(),
        created_at: (base + Duration::minutes(minutes)).to_rfc3339(),
        name: name.to_string(),
        due_date: "2024-01-31".to_string(),
        done: false,
        attachment_url: None,
    }
}

pub fn buy_milk() -> TodoItem {
    TodoItem {
        user_id: "u1".to_string(),
        todo_id: "t1".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        name: "Buy milk".to_string(),
        due_date: "2024-01-01".to_string(),
        done: false,
        attachment_url: None,
    }
}

pub fn buy_milk_and_eggs() -> TodoUpdate {
    TodoUpdate {
        name: "Buy milk and eggs".to_string(),
        due_date: "2024-01-02".to_string(),
        done: true,
    }
}
