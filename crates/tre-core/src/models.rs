//! Domain models for TRE resources.

pub mod resource;
pub mod user_resource;
