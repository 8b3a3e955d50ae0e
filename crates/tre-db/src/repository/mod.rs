//! Repository implementations over a [`DocumentStore`](tre_core::repository::DocumentStore).

mod user_resource;

pub use user_resource::{
    UserResourceRepository, active_user_resources_query, user_resource_by_id_query,
};
