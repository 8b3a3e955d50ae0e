//! Process-wide configuration.

use crate::error::{TreError, TreResult};

/// Environment variable holding the deployment identifier.
pub const TRE_ID_ENV: &str = "TRE_ID";

/// Configuration shared by every repository in the process.
#[derive(Debug, Clone)]
pub struct TreConfig {
    /// Deployment identifier stamped onto every created resource as
    /// `properties.tre_id`.
    pub tre_id: String,
}

impl TreConfig {
    pub fn new(tre_id: impl Into<String>) -> Self {
        Self {
            tre_id: tre_id.into(),
        }
    }

    /// Load from the process environment. `TRE_ID` must be set and
    /// non-blank.
    pub fn from_env() -> TreResult<Self> {
        let value = std::env::var(TRE_ID_ENV).ok();
        Self::from_value(value.as_deref())
    }

    fn from_value(value: Option<&str>) -> TreResult<Self> {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self::new(id)),
            _ => Err(TreError::Configuration(format!(
                "{TRE_ID_ENV} must be set to a non-empty value"
            ))),
        }
    }
}
