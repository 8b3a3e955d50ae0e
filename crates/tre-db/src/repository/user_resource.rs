//! User resource repository.
//!
//! Maps create/list/get/patch intents on [`UserResource`] entities to
//! document queries and writes. Storage and template validation are
//! injected collaborators.

use serde_json::Value;
use tracing::{debug, info, warn};
use tre_core::config::TreConfig;
use tre_core::error::{TreError, TreResult};
use tre_core::models::resource::ResourceType;
use tre_core::models::user_resource::{
    ENABLED_PROPERTY, TRE_ID_PROPERTY, UserResource, UserResourceInCreate,
    UserResourcePatchEnabled, user_resource_path,
};
use tre_core::query::{DocumentQuery, Predicate};
use tre_core::repository::{DocumentStore, TemplateValidator};
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "user resource";

/// Active user resources under a workspace service.
pub fn active_user_resources_query(workspace_id: &str, service_id: &str) -> DocumentQuery {
    DocumentQuery::new()
        .filter(Predicate::ne("isActive", false))
        .filter(Predicate::eq(
            "resourceType",
            ResourceType::UserResource.as_str(),
        ))
        .filter(Predicate::eq("parentWorkspaceServiceId", service_id))
        .filter(Predicate::eq("workspaceId", workspace_id))
}

/// A single user resource by id, active or not.
pub fn user_resource_by_id_query(
    workspace_id: &str,
    service_id: &str,
    resource_id: &str,
) -> DocumentQuery {
    DocumentQuery::new()
        .filter(Predicate::eq(
            "resourceType",
            ResourceType::UserResource.as_str(),
        ))
        .filter(Predicate::eq("parentWorkspaceServiceId", service_id))
        .filter(Predicate::eq("workspaceId", workspace_id))
        .filter(Predicate::eq("id", resource_id))
}

fn to_document(resource: &UserResource) -> TreResult<Value> {
    Ok(serde_json::to_value(resource).map_err(DbError::from)?)
}

fn from_document(doc: Value) -> TreResult<UserResource> {
    Ok(serde_json::from_value(doc).map_err(DbError::from)?)
}

/// Data access for user resources.
///
/// Holds no mutable state of its own; sharing one instance across tasks
/// is safe when the store is.
#[derive(Clone)]
pub struct UserResourceRepository<S: DocumentStore, V: TemplateValidator> {
    store: S,
    validator: V,
    config: TreConfig,
}

impl<S: DocumentStore, V: TemplateValidator> UserResourceRepository<S, V> {
    pub fn new(store: S, validator: V, config: TreConfig) -> Self {
        Self {
            store,
            validator,
            config,
        }
    }

    /// Build a new user resource from caller input.
    ///
    /// The input is validated against its template first; a validation
    /// failure is returned unchanged and nothing is built. The returned
    /// entity is not persisted, see [`Self::save_user_resource`].
    pub fn create_user_resource_item(
        &self,
        input: UserResourceInCreate,
        workspace_id: &str,
        service_id: &str,
        parent_template_name: &str,
        owner_id: &str,
    ) -> TreResult<UserResource> {
        let template = self
            .validator
            .validate_input_against_template(&input, parent_template_name)?;

        let id = Uuid::new_v4().to_string();

        let mut properties = input.properties;
        properties.insert(
            TRE_ID_PROPERTY.to_string(),
            Value::String(self.config.tre_id.clone()),
        );

        debug!(
            id = %id,
            workspace_id,
            service_id,
            template = %template.name,
            "Built user resource"
        );

        Ok(UserResource {
            resource_path: user_resource_path(workspace_id, service_id, &id),
            id,
            resource_type: ResourceType::UserResource,
            template_name: template.name,
            template_version: template.version,
            properties,
            workspace_id: workspace_id.to_string(),
            parent_workspace_service_id: service_id.to_string(),
            owner_id: owner_id.to_string(),
            is_active: true,
        })
    }

    /// Persist a newly built user resource.
    pub async fn save_user_resource(&self, resource: &UserResource) -> TreResult<()> {
        self.store.save_item(&to_document(resource)?).await?;
        info!(id = %resource.id, "Saved user resource");
        Ok(())
    }

    /// Active user resources under the given workspace service. Empty when
    /// none match.
    pub async fn get_user_resources_for_workspace_service(
        &self,
        workspace_id: &str,
        service_id: &str,
    ) -> TreResult<Vec<UserResource>> {
        let query = active_user_resources_query(workspace_id, service_id);
        let docs = self.store.query(&query).await?;

        docs.into_iter().map(from_document).collect()
    }

    /// Look up a user resource by id, including soft-deleted ones.
    pub async fn get_user_resource_by_id(
        &self,
        workspace_id: &str,
        service_id: &str,
        resource_id: &str,
    ) -> TreResult<UserResource> {
        let query = user_resource_by_id_query(workspace_id, service_id, resource_id);
        let docs = self.store.query(&query).await?;

        if docs.len() > 1 {
            warn!(
                id = resource_id,
                count = docs.len(),
                "Multiple user resources share one id; using the first"
            );
        }

        let doc = docs
            .into_iter()
            .next()
            .ok_or_else(|| TreError::EntityDoesNotExist {
                entity: ENTITY.into(),
                id: resource_id.to_string(),
            })?;

        from_document(doc)
    }

    /// Write `patch.enabled` to `properties.enabled` and persist.
    ///
    /// The caller's copy is mutated before the store is called, so it stays
    /// mutated even if the update fails.
    pub async fn patch_user_resource(
        &self,
        resource: &mut UserResource,
        patch: UserResourcePatchEnabled,
    ) -> TreResult<()> {
        resource
            .properties
            .insert(ENABLED_PROPERTY.to_string(), Value::Bool(patch.enabled));

        self.update_item(resource).await
    }

    /// Soft delete: clears `isActive` and persists.
    pub async fn mark_user_resource_as_deleted(&self, resource: &mut UserResource) -> TreResult<()> {
        resource.is_active = false;
        self.update_item(resource).await?;
        info!(id = %resource.id, "Marked user resource as deleted");
        Ok(())
    }

    /// Persist an entity by id.
    pub async fn update_item(&self, resource: &UserResource) -> TreResult<()> {
        self.store.update_item(&to_document(resource)?).await
    }
}
