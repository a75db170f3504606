//! # Dashboard RBAC
//!
//! Authorization decisions for the dashboard: who a user is (a ranked
//! [`Role`]) and what they may do (a flat list of `resource:action`
//! permission tokens).
//!
//! ## Core Principle
//!
//! **Fail closed**: a missing role, a missing permission list or an unknown
//! role value always resolves to deny. Evaluators never error; they answer
//! `true` or `false`.
//!
//! ## Rank table
//!
//! ```text
//!   admin      3
//!   manager    2   ─┐ tie
//!   spc        2   ─┘
//!   employee   1
//! ```
//!
//! ## Data flow
//!
//! ```text
//! RoleRecord(s) ──expand──▶ session.user { role, permissions }
//!                                     │
//!                                     ▼
//!                               AuthContext ──▶ has_role / has_at_least_role / can
//!                                     │
//!                                     ▼
//!                             guard deny ──▶ redirect /403
//! ```

pub mod catalog;
pub mod errors;
pub mod rbac;

pub use catalog::RoleCatalog;
pub use errors::{RbacError, Result};
pub use rbac::{
    can, can_all, can_any, has_at_least_role, has_role, Action, AuthContext, Permission, Resource,
    Role, RoleRecord, Session, SessionUser,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
