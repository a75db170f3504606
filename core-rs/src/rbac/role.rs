//! Role hierarchy evaluator
//!
//! Roles carry a fixed privilege rank. The ranking is a preorder:
//! `manager` and `spc` share rank 2, so neither outranks the other.

use crate::errors::RbacError;
use clap::builder::PossibleValue;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Coarse-grained user category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    Spc,
}

/// Role -> privilege level. Built once, never written again.
static RANK_TABLE: Lazy<HashMap<Role, u8>> = Lazy::new(|| {
    HashMap::from([
        (Role::Admin, 3),
        (Role::Manager, 2),
        (Role::Spc, 2),
        (Role::Employee, 1),
    ])
});

impl Role {
    /// Every role in the closed set
    pub const fn all() -> [Role; 4] {
        [Role::Admin, Role::Manager, Role::Employee, Role::Spc]
    }

    /// Lowercase key used in sessions, records and the catalog
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Spc => "spc",
        }
    }

    /// Privilege level from the rank table, 0 if the role is missing from it
    pub fn rank(&self) -> u8 {
        RANK_TABLE.get(self).copied().unwrap_or(0)
    }

    /// True if `self` is at least as privileged as `other`
    pub fn outranks_or_equals(&self, other: Role) -> bool {
        self.rank() >= other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueEnum for Role {
    fn value_variants<'a>() -> &'a [Self] {
        &[Role::Admin, Role::Manager, Role::Employee, Role::Spc]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            "spc" => Ok(Role::Spc),
            other => Err(RbacError::InvalidRole(other.to_string())),
        }
    }
}

/// Check whether `role` is one of `allowed_roles`
///
/// Absent role or an empty allowed set denies.
pub fn has_role(role: Option<Role>, allowed_roles: &[Role]) -> bool {
    let granted = match role {
        Some(r) => allowed_roles.contains(&r),
        None => false,
    };
    debug!(role = ?role, allowed = ?allowed_roles, granted, "has_role");
    granted
}

/// Check whether `role` ranks at least as high as `min_role`
///
/// Absent role denies.
pub fn has_at_least_role(role: Option<Role>, min_role: Role) -> bool {
    let granted = match role {
        Some(r) => r.outranks_or_equals(min_role),
        None => false,
    };
    debug!(role = ?role, min = %min_role, granted, "has_at_least_role");
    granted
}
