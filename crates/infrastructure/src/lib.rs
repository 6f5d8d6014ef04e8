pub mod dynamodb;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;
pub mod todos_access;

pub use dynamodb::*;
pub use error::*;
pub use memory::*;
pub use models::*;
pub use store::*;
pub use todos_access::*;
