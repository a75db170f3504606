//! Permission evaluator
//!
//! A permission list is a flat bag of opaque tokens. A `(resource, action)`
//! pair is granted when its canonical token `resource:action` is present.
//! Order and duplicates in the list do not matter.

use crate::errors::RbacError;
use clap::builder::PossibleValue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Separator between resource and action in a permission token
pub const TOKEN_SEPARATOR: char = ':';

/// Dashboard resource a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Products,
    Orders,
    Customers,
    Users,
    Roles,
    Reports,
    Settings,
}

impl Resource {
    pub const fn all() -> [Resource; 7] {
        [
            Resource::Products,
            Resource::Orders,
            Resource::Customers,
            Resource::Users,
            Resource::Roles,
            Resource::Reports,
            Resource::Settings,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Products => "products",
            Resource::Orders => "orders",
            Resource::Customers => "customers",
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::Reports => "reports",
            Resource::Settings => "settings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueEnum for Resource {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Resource::Products,
            Resource::Orders,
            Resource::Customers,
            Resource::Users,
            Resource::Roles,
            Resource::Reports,
            Resource::Settings,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

impl FromStr for Resource {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::all()
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| RbacError::InvalidResource(s.to_string()))
    }
}

/// Operation performed on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const fn all() -> [Action; 5] {
        [
            Action::Read,
            Action::Write,
            Action::Create,
            Action::Update,
            Action::Delete,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueEnum for Action {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Action::Read,
            Action::Write,
            Action::Create,
            Action::Update,
            Action::Delete,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

impl FromStr for Action {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RbacError::InvalidAction(s.to_string()))
    }
}

/// A single `(resource, action)` grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Permission { resource, action }
    }

    /// Canonical token, e.g. `products:read`
    pub fn token(&self) -> String {
        format!("{}{}{}", self.resource, TOKEN_SEPARATOR, self.action)
    }

    /// True if `token` is exactly this permission's canonical token
    pub fn matches(&self, token: &str) -> bool {
        // Piecewise compare, no allocation per entry
        match token.split_once(TOKEN_SEPARATOR) {
            Some((resource, action)) => {
                resource == self.resource.as_str() && action == self.action.as_str()
            }
            None => false,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.resource, TOKEN_SEPARATOR, self.action)
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .split_once(TOKEN_SEPARATOR)
            .ok_or_else(|| RbacError::InvalidPermission(s.to_string()))?;

        Ok(Permission {
            resource: resource.parse()?,
            action: action.parse()?,
        })
    }
}

impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Check whether `permissions` grants `action` on `resource`
///
/// An absent list denies. Entries that are not well-formed tokens never match.
pub fn can<S: AsRef<str>>(permissions: Option<&[S]>, resource: Resource, action: Action) -> bool {
    let wanted = Permission::new(resource, action);
    let granted = match permissions {
        Some(list) => list.iter().any(|p| wanted.matches(p.as_ref())),
        None => false,
    };
    debug!(permission = %wanted, granted, "can");
    granted
}

/// Check whether any of `wanted` is granted. An empty request denies.
pub fn can_any<S: AsRef<str>>(permissions: Option<&[S]>, wanted: &[Permission]) -> bool {
    wanted
        .iter()
        .any(|p| can(permissions, p.resource, p.action))
}

/// Check whether every one of `wanted` is granted. An empty request denies.
pub fn can_all<S: AsRef<str>>(permissions: Option<&[S]>, wanted: &[Permission]) -> bool {
    !wanted.is_empty()
        && wanted
            .iter()
            .all(|p| can(permissions, p.resource, p.action))
}
