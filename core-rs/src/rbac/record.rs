//! Persisted Role record
//!
//! Shape of a role as stored in the document store. Records are created and
//! edited by an administrative process; the evaluators only ever see the
//! permission lists expanded from them.

use crate::errors::{RbacError, Result};
use crate::rbac::permission::{can, Action, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    /// Display name
    pub name: String,
    /// Unique stable identifier
    pub key: String,
    /// Permission tokens granted by this role
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoleRecord {
    pub fn new(name: impl Into<String>, key: impl Into<String>, permissions: Vec<String>) -> Self {
        let now = Utc::now();
        RoleRecord {
            name: name.into(),
            key: key.into(),
            permissions,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Ensure required fields are present
    ///
    /// An empty permission list is allowed; a blank token inside it is not.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(RbacError::ValidationError(
                "Role key cannot be empty".to_string(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(RbacError::ValidationError(format!(
                "Role '{}' has an empty name",
                self.key
            )));
        }

        if let Some(idx) = self.permissions.iter().position(|p| p.trim().is_empty()) {
            return Err(RbacError::ValidationError(format!(
                "Role '{}' has an empty permission at index {}",
                self.key, idx
            )));
        }

        Ok(())
    }

    pub fn grants(&self, resource: Resource, action: Action) -> bool {
        can(Some(&self.permissions[..]), resource, action)
    }
}
