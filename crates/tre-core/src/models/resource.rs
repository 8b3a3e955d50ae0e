//! Resource kinds shared by every entity stored in the resource container.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Workspace,
    WorkspaceService,
    UserResource,
    SharedService,
}

impl ResourceType {
    /// Discriminator value stored in the `resourceType` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Workspace => "workspace",
            ResourceType::WorkspaceService => "workspace-service",
            ResourceType::UserResource => "user-resource",
            ResourceType::SharedService => "shared-service",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_form_matches_discriminator() {
        for kind in [
            ResourceType::Workspace,
            ResourceType::WorkspaceService,
            ResourceType::UserResource,
            ResourceType::SharedService,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().into()));
        }
    }
}
