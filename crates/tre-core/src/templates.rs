//! In-process catalog of user resource templates.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{TreError, TreResult};
use crate::models::user_resource::{TRE_ID_PROPERTY, UserResourceInCreate};
use crate::repository::{ResolvedTemplate, TemplateValidator};

/// Catalog entry for a user resource template.
#[derive(Debug, Clone)]
pub struct UserResourceTemplate {
    pub name: String,
    /// Semantic version recorded on resources created from this template.
    pub version: String,
    /// Workspace-service templates this template may be deployed under.
    /// Empty permits any parent.
    pub parent_service_templates: Vec<String>,
    /// Property keys the caller must supply.
    pub required_properties: Vec<String>,
}

impl UserResourceTemplate {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            parent_service_templates: Vec::new(),
            required_properties: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_service_templates.push(parent.into());
        self
    }

    pub fn with_required(mut self, property: impl Into<String>) -> Self {
        self.required_properties.push(property.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, UserResourceTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any entry with the same name.
    pub fn register(&mut self, template: UserResourceTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    pub fn get(&self, name: &str) -> Option<&UserResourceTemplate> {
        self.templates.get(name)
    }
}

impl TemplateValidator for TemplateCatalog {
    fn validate_input_against_template(
        &self,
        input: &UserResourceInCreate,
        parent_template_name: &str,
    ) -> TreResult<ResolvedTemplate> {
        let template = self.get(&input.template_name).ok_or_else(|| {
            TreError::validation(format!("unknown template: {}", input.template_name))
        })?;

        if !template.parent_service_templates.is_empty()
            && !template
                .parent_service_templates
                .iter()
                .any(|p| p == parent_template_name)
        {
            return Err(TreError::validation(format!(
                "template {} cannot be deployed under workspace service template {}",
                template.name, parent_template_name
            )));
        }

        // tre_id is stamped from configuration, never taken from callers.
        let missing: Vec<&str> = template
            .required_properties
            .iter()
            .map(String::as_str)
            .filter(|key| *key != TRE_ID_PROPERTY && !input.properties.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(TreError::validation(format!(
                "missing required properties: {}",
                missing.join(", ")
            )));
        }

        debug!(
            template = %template.name,
            version = %template.version,
            parent = parent_template_name,
            "Validated user resource input"
        );

        Ok(ResolvedTemplate {
            name: template.name.clone(),
            version: template.version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> TemplateCatalog {
        let mut catalog = TemplateCatalog::new();
        catalog.register(
            UserResourceTemplate::new("user-resource-type", "0.1.0")
                .with_parent("parent-service-type")
                .with_required("display_name")
                .with_required(TRE_ID_PROPERTY),
        );
        catalog
    }

    fn input(template: &str, properties: serde_json::Value) -> UserResourceInCreate {
        UserResourceInCreate {
            template_name: template.into(),
            properties: properties.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn resolves_known_template() {
        let resolved = catalog()
            .validate_input_against_template(
                &input("user-resource-type", json!({"display_name": "x"})),
                "parent-service-type",
            )
            .unwrap();
        assert_eq!(resolved.name, "user-resource-type");
        assert_eq!(resolved.version, "0.1.0");
    }

    #[test]
    fn unknown_template_is_a_validation_error() {
        let err = catalog()
            .validate_input_against_template(&input("nope", json!({})), "parent-service-type")
            .unwrap_err();
        assert!(matches!(err, TreError::Validation { .. }));
    }

    #[test]
    fn wrong_parent_is_rejected() {
        let err = catalog()
            .validate_input_against_template(
                &input("user-resource-type", json!({"display_name": "x"})),
                "other-service",
            )
            .unwrap_err();
        assert!(matches!(err, TreError::Validation { .. }));
    }

    #[test]
    fn missing_required_property_is_rejected() {
        let err = catalog()
            .validate_input_against_template(
                &input("user-resource-type", json!({"description": "x"})),
                "parent-service-type",
            )
            .unwrap_err();
        match err {
            TreError::Validation { message } => assert!(message.contains("display_name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn any_parent_allowed_when_unrestricted() {
        let mut catalog = TemplateCatalog::new();
        catalog.register(UserResourceTemplate::new("open", "1.0.0"));
        assert!(
            catalog
                .validate_input_against_template(&input("open", json!({})), "anything")
                .is_ok()
        );
    }
}
