/**
 * config.rs
 * Parser for role catalog files (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: dashboard/v1
 * kind: RoleCatalog
 * unauthorizedPath: /403
 * roles:
 *   - name: Administrator
 *     key: admin
 *     permissions: ["products:read", "products:write"]
 * ```
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{RbacError, DEFAULT_UNAUTHORIZED_PATH};
use crate::rbac::RoleRecord;

pub const API_VERSION: &str = "dashboard/v1";
pub const KIND: &str = "RoleCatalog";

/// Role catalog file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleCatalog {
    pub api_version: String,
    pub kind: String,
    /// Page guards redirect here on deny
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unauthorized_path: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<RoleRecord>) -> Self {
        RoleCatalog {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            unauthorized_path: None,
            roles,
        }
    }

    /// Load a catalog from the specified path
    ///
    /// # Arguments
    /// * `path` - Path to the catalog YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RbacError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RbacError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;

        debug!(path = %path.display(), roles = catalog.roles.len(), "loaded role catalog");
        Ok(catalog)
    }

    /// Parse and validate a catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, RbacError> {
        let catalog: RoleCatalog = serde_yaml::from_str(content).map_err(|e| {
            RbacError::ParseError(format!("Invalid role catalog YAML: {}", e))
        })?;

        catalog.validate()?;

        Ok(catalog)
    }

    /// Validate catalog structure
    ///
    /// Ensures:
    /// - apiVersion is "dashboard/v1"
    /// - kind is "RoleCatalog"
    /// - every record is valid and keys are unique
    pub fn validate(&self) -> Result<(), RbacError> {
        if self.api_version != API_VERSION {
            return Err(RbacError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(RbacError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if let Some(path) = &self.unauthorized_path {
            if !path.starts_with('/') {
                return Err(RbacError::ValidationError(format!(
                    "unauthorizedPath must be absolute, got '{}'",
                    path
                )));
            }
        }

        let mut seen = HashSet::new();
        for record in &self.roles {
            record.validate()?;
            if !seen.insert(record.key.as_str()) {
                return Err(RbacError::DuplicateRoleKey(record.key.clone()));
            }
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RoleRecord> {
        self.roles.iter().find(|r| r.key == key)
    }

    /// Like [`get`](Self::get) but errors when the key is unknown
    pub fn require(&self, key: &str) -> Result<&RoleRecord, RbacError> {
        self.get(key)
            .ok_or_else(|| RbacError::RoleNotFound(key.to_string()))
    }

    pub fn unauthorized_path(&self) -> &str {
        self.unauthorized_path
            .as_deref()
            .unwrap_or(DEFAULT_UNAUTHORIZED_PATH)
    }

    /// Flatten the permissions of the given role keys
    ///
    /// Result is de-duplicated and keeps first-seen order. Unknown keys
    /// contribute nothing.
    pub fn effective_permissions<S: AsRef<str>>(&self, keys: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for key in keys {
            let key = key.as_ref();
            let Some(record) = self.get(key) else {
                warn!(key, "role key not in catalog, skipping");
                continue;
            };

            for perm in &record.permissions {
                if seen.insert(perm.as_str()) {
                    out.push(perm.clone());
                }
            }
        }

        out
    }
}
