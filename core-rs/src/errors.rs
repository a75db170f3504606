//! Error types for the dashboard RBAC core

use thiserror::Error;

/// Default redirect target for denied requests
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/403";

#[derive(Error, Debug)]
pub enum RbacError {
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid permission token: {0}")]
    InvalidPermission(String),

    #[error("Forbidden: {reason} (redirect to {redirect})")]
    Forbidden { reason: String, redirect: String },

    #[error("Duplicate role key: {0}")]
    DuplicateRoleKey(String),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl RbacError {
    /// Forbidden error routed to the default unauthorized page
    pub fn forbidden(reason: impl Into<String>) -> Self {
        RbacError::Forbidden {
            reason: reason.into(),
            redirect: DEFAULT_UNAUTHORIZED_PATH.to_string(),
        }
    }

    /// Redirect target if this is a deny, `None` otherwise
    pub fn redirect(&self) -> Option<&str> {
        match self {
            RbacError::Forbidden { redirect, .. } => Some(redirect.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RbacError>;
