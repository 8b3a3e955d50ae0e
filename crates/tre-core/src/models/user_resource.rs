//! User resource domain model.
//!
//! A user resource is a per-user instance provisioned under a workspace
//! service. Documents are stored with camelCase field names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resource::ResourceType;

/// Property key holding the deployment identifier.
pub const TRE_ID_PROPERTY: &str = "tre_id";

/// Property key toggled by [`UserResourcePatchEnabled`].
pub const ENABLED_PROPERTY: &str = "enabled";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    pub id: String,
    #[serde(default = "user_resource_type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub template_version: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub parent_workspace_service_id: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub resource_path: String,
    /// Soft-delete flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn user_resource_type() -> ResourceType {
    ResourceType::UserResource
}

fn default_active() -> bool {
    true
}

impl UserResource {
    /// A bare, active user resource with the given id. Remaining fields
    /// are empty.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: ResourceType::UserResource,
            template_name: String::new(),
            template_version: String::new(),
            properties: Map::new(),
            workspace_id: String::new(),
            parent_workspace_service_id: String::new(),
            owner_id: String::new(),
            resource_path: String::new(),
            is_active: true,
        }
    }
}

/// Navigation path of a user resource under its workspace service.
pub fn user_resource_path(workspace_id: &str, service_id: &str, resource_id: &str) -> String {
    format!("/workspaces/{workspace_id}/workspace-services/{service_id}/user-resources/{resource_id}")
}

/// Caller input for creating a user resource. Identifiers are assigned
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResourceInCreate {
    pub template_name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Patch toggling `properties.enabled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResourcePatchEnabled {
    pub enabled: bool,
}
