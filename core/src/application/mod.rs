//! Application layer - Use case services.
//!
//! This module contains the services that turn CLI output into session state
//! and menu actions:
//! - `detector`: is a tunnel running, and into which namespace
//! - `catalog`: which namespaces and review releases can be started
//! - `locator`: where the active tunnel's configuration file lives
//! - `controller`: menu assembly and action dispatch
//!
//! Services take their collaborators through the traits in `ports`, so
//! the process table and the cluster can be faked in tests.

mod catalog;
mod controller;
mod detector;
mod locator;

pub use catalog::{parse_release_listing, Catalog, NamespaceCatalogBuilder};
pub use controller::SessionController;
pub use detector::{extract_namespace, parse_session_state, ActiveSessionDetector};
pub use locator::ConfigFileLocator;
