//! TRE Core — domain models, error types, configuration and the
//! collaborator traits shared by the storage and service crates.

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod templates;

pub use config::TreConfig;
pub use error::{TreError, TreResult};
pub use query::{DocumentQuery, Predicate, QueryValue};
pub use templates::{TemplateCatalog, UserResourceTemplate};
