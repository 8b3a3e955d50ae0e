//! Collaborator traits for data access and template validation.
//!
//! Repositories receive these as injected collaborators so that storage
//! engines and template catalogs can be substituted, including with test
//! doubles.

use serde_json::Value;

use crate::error::TreResult;
use crate::models::user_resource::UserResourceInCreate;
use crate::query::DocumentQuery;

// ---------------------------------------------------------------------------
// Generic document storage
// ---------------------------------------------------------------------------

/// Generic document container. Documents are JSON objects keyed by their
/// string `id` field.
pub trait DocumentStore: Send + Sync {
    /// Run a read-only query and return the raw matching documents.
    fn query(&self, query: &DocumentQuery) -> impl Future<Output = TreResult<Vec<Value>>> + Send;

    /// Insert a new document. Fails if a document with the same id exists.
    fn save_item(&self, item: &Value) -> impl Future<Output = TreResult<()>> + Send;

    /// Persist a document by id, replacing any stored version.
    fn update_item(&self, item: &Value) -> impl Future<Output = TreResult<()>> + Send;

    /// Point read by id. Fails with `EntityDoesNotExist` when absent.
    fn read_item_by_id(&self, id: &str) -> impl Future<Output = TreResult<Value>> + Send;
}

// ---------------------------------------------------------------------------
// Template validation
// ---------------------------------------------------------------------------

/// Template a creation request resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub name: String,
    pub version: String,
}

pub trait TemplateValidator: Send + Sync {
    /// Check `input` against the catalog entry for its template, in the
    /// context of the parent workspace-service template. Fails with
    /// `TreError::Validation` when the template is unknown or the
    /// properties do not conform.
    fn validate_input_against_template(
        &self,
        input: &UserResourceInCreate,
        parent_template_name: &str,
    ) -> TreResult<ResolvedTemplate>;
}

/// Recover the `id` field of a raw document.
pub fn document_id(item: &Value) -> TreResult<&str> {
    item.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| crate::error::TreError::validation("document has no string `id` field"))
}
