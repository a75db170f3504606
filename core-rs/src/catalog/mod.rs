//! File-backed role catalog
//!
//! Local stand-in for the document store that holds Role records, plus the
//! expansion of role keys into a session's flat permission list.

pub mod config;

pub use config::{RoleCatalog, API_VERSION, KIND};
