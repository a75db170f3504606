//! Authorization context built from a session
//!
//! The session layer hands over a loose user object; this module turns it into
//! a typed [`AuthContext`] once, and every guard reads from that.

use crate::errors::{RbacError, Result, DEFAULT_UNAUTHORIZED_PATH};
use crate::rbac::permission::{self, Action, Permission, Resource};
use crate::rbac::role::{self, Role};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// User object as supplied by the session provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// Session envelope; `user` is absent while unauthenticated or loading
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    /// Parse a serialized session as handed over by the session provider
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Per-request authorization data
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub role: Option<Role>,
    pub permissions: Option<Vec<String>>,
    unauthorized_path: String,
}

impl Default for AuthContext {
    fn default() -> Self {
        AuthContext::anonymous()
    }
}

impl AuthContext {
    pub fn new(role: Option<Role>, permissions: Option<Vec<String>>) -> Self {
        AuthContext {
            role,
            permissions,
            unauthorized_path: DEFAULT_UNAUTHORIZED_PATH.to_string(),
        }
    }

    /// No role, no permissions. Denies everything.
    pub fn anonymous() -> Self {
        AuthContext::new(None, None)
    }

    /// Build from the session user
    ///
    /// A role outside the known set is dropped (treated as absent).
    pub fn from_user(user: &SessionUser) -> Self {
        let role = user.role.as_deref().and_then(|raw| match raw.parse::<Role>() {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(role = raw, error = %e, "unknown session role, denying role checks");
                None
            }
        });

        AuthContext::new(role, user.permissions.clone())
    }

    pub fn from_session(session: &Session) -> Self {
        match &session.user {
            Some(user) => AuthContext::from_user(user),
            None => AuthContext::anonymous(),
        }
    }

    /// Override the page guards redirect to on deny
    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    pub fn unauthorized_path(&self) -> &str {
        &self.unauthorized_path
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn has_role(&self, allowed_roles: &[Role]) -> bool {
        role::has_role(self.role, allowed_roles)
    }

    pub fn has_at_least_role(&self, min_role: Role) -> bool {
        role::has_at_least_role(self.role, min_role)
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        permission::can(self.permissions.as_deref(), resource, action)
    }

    pub fn require_role(&self, allowed_roles: &[Role]) -> Result<()> {
        if self.has_role(allowed_roles) {
            return Ok(());
        }

        let allowed: Vec<&str> = allowed_roles.iter().map(Role::as_str).collect();
        Err(self.deny(format!("role not in [{}]", allowed.join(", "))))
    }

    pub fn require_at_least_role(&self, min_role: Role) -> Result<()> {
        if self.has_at_least_role(min_role) {
            return Ok(());
        }

        Err(self.deny(format!("role below {}", min_role)))
    }

    pub fn require_permission(&self, resource: Resource, action: Action) -> Result<()> {
        if self.can(resource, action) {
            return Ok(());
        }

        Err(self.deny(format!("missing {}", Permission::new(resource, action))))
    }

    fn deny(&self, reason: String) -> RbacError {
        warn!(role = ?self.role, %reason, redirect = %self.unauthorized_path, "access denied");
        RbacError::Forbidden {
            reason,
            redirect: self.unauthorized_path.clone(),
        }
    }
}

impl From<&Session> for AuthContext {
    fn from(session: &Session) -> Self {
        AuthContext::from_session(session)
    }
}
