use crate::{IndexSchema, Item, StoreError, StoreResult, TableSchema};
use aws_sdk_dynamodb::types::AttributeValue;
use domain::{TodoItem, TodoUpdate};

/// Attribute names of todo items in the todos table.
pub mod attr {
    pub const USER_ID: &str = "userId";
    pub const TODO_ID: &str = "todoId";
    pub const CREATED_AT: &str = "createdAt";
    pub const NAME: &str = "name";
    pub const DUE_DATE: &str = "dueDate";
    pub const DONE: &str = "done";
    pub const ATTACHMENT_URL: &str = "attachmentUrl";
}

/// Primary key of a todo item: `userId` (partition) and `todoId` (sort).
pub fn todo_key(todo_id: &str, user_id: &str) -> Item {
    Item::from([
        (attr::TODO_ID.to_string(), AttributeValue::S(todo_id.to_string())),
        (attr::USER_ID.to_string(), AttributeValue::S(user_id.to_string())),
    ])
}

/// Layout of the todos table and its per-user creation-time index.
pub fn todos_table_schema(index_name: &str) -> TableSchema {
    TableSchema::new(attr::USER_ID, Some(attr::TODO_ID)).with_index(
        index_name,
        IndexSchema::new(attr::USER_ID, Some(attr::CREATED_AT)),
    )
}

pub fn todo_to_item(todo: &TodoItem) -> Item {
    let mut item = todo_key(&todo.todo_id, &todo.user_id);
    item.insert(
        attr::CREATED_AT.to_string(),
        AttributeValue::S(todo.created_at.clone()),
    );
    item.insert(attr::NAME.to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(
        attr::DUE_DATE.to_string(),
        AttributeValue::S(todo.due_date.clone()),
    );
    item.insert(attr::DONE.to_string(), AttributeValue::Bool(todo.done));

    if let Some(url) = &todo.attachment_url {
        item.insert(
            attr::ATTACHMENT_URL.to_string(),
            AttributeValue::S(url.clone()),
        );
    }

    item
}

/// Whether `item` is a whole todo rather than the key-plus-changes fragment an
/// update on a missing key leaves behind. Fragments have no `createdAt`, so
/// they are also absent from the creation-time index.
pub fn is_todo_record(item: &Item) -> bool {
    item.contains_key(attr::CREATED_AT)
}

pub fn item_to_todo(item: &Item) -> StoreResult<TodoItem> {
    Ok(TodoItem {
        user_id: string_attr(item, attr::USER_ID)?,
        todo_id: string_attr(item, attr::TODO_ID)?,
        created_at: string_attr(item, attr::CREATED_AT)?,
        name: string_attr(item, attr::NAME)?,
        due_date: string_attr(item, attr::DUE_DATE)?,
        done: bool_attr(item, attr::DONE)?,
        attachment_url: match item.get(attr::ATTACHMENT_URL) {
            None | Some(AttributeValue::Null(_)) => None,
            Some(AttributeValue::S(url)) => Some(url.clone()),
            Some(_) => return Err(wrong_type(attr::ATTACHMENT_URL, "S")),
        },
    })
}

/// The attributes a [`TodoUpdate`] replaces.
pub fn update_to_changes(update: &TodoUpdate) -> Item {
    Item::from([
        (attr::NAME.to_string(), AttributeValue::S(update.name.clone())),
        (
            attr::DUE_DATE.to_string(),
            AttributeValue::S(update.due_date.clone()),
        ),
        (attr::DONE.to_string(), AttributeValue::Bool(update.done)),
    ])
}

fn string_attr(item: &Item, name: &str) -> StoreResult<String> {
    item.get(name)
        .ok_or_else(|| missing(name))?
        .as_s()
        .cloned()
        .map_err(|_| wrong_type(name, "S"))
}

fn bool_attr(item: &Item, name: &str) -> StoreResult<bool> {
    item.get(name)
        .ok_or_else(|| missing(name))?
        .as_bool()
        .copied()
        .map_err(|_| wrong_type(name, "BOOL"))
}

fn missing(name: &str) -> StoreError {
    StoreError::MalformedItem(format!("missing attribute `{name}`"))
}

fn wrong_type(name: &str, expected: &str) -> StoreError {
    StoreError::MalformedItem(format!("attribute `{name}` is not of type {expected}"))
}
