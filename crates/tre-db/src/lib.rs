//! TRE Database — SurrealDB connection management, schema migrations,
//! the document store and the user resource repository.

mod connection;
mod error;
pub mod repository;
mod schema;
mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::UserResourceRepository;
pub use schema::{USER_RESOURCE_TABLE, run_migrations, schema_v1};
pub use store::SurrealDocumentStore;
