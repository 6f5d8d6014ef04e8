use std::env;

const DEFAULT_TODOS_TABLE: &str = "Todos-dev";
const DEFAULT_TODOS_CREATED_AT_INDEX: &str = "CreatedAtIndex";
const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Process-level settings for the todos data layer.
///
/// Only [`Config::from_env`] reads the environment; everything downstream
/// receives the struct explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub todos_table: String,
    pub todos_created_at_index: String,
    pub aws_region: String,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            todos_table: lookup("TODOS_TABLE")
                .unwrap_or_else(|| DEFAULT_TODOS_TABLE.to_string()),
            todos_created_at_index: lookup("TODOS_CREATED_AT_INDEX")
                .unwrap_or_else(|| DEFAULT_TODOS_CREATED_AT_INDEX.to_string()),
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|url| !url.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
