//! RBAC (Role-Based Access Control) module
//!
//! Role ranking, permission checks, the persisted Role record shape,
//! and the per-request authorization context with its guards.

pub mod context;
pub mod permission;
pub mod record;
pub mod role;

pub use context::{AuthContext, Session, SessionUser};
pub use permission::{can, can_all, can_any, Action, Permission, Resource};
pub use record::RoleRecord;
pub use role::{has_at_least_role, has_role, Role};
