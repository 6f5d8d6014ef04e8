use aws_sdk_dynamodb::error::DisplayErrorContext;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the request. `source` is the
    /// store's own error, untouched.
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Malformed todo item: {0}")]
    MalformedItem(String),
}

impl StoreError {
    pub fn backend<E>(operation: &'static str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            operation,
            message: DisplayErrorContext(&error).to_string(),
            source: Box::new(error),
        }
    }

    /// Backend failure that only carries a message, for stores without a
    /// native error type.
    pub fn backend_message(operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Backend {
            operation,
            source: message.clone().into(),
            message,
        }
    }
}
