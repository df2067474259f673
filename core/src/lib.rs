//! mayo-menu Core Library
//!
//! Port-forward session orchestration on top of existing CLIs.
//! Provides functionality to:
//! - Detect whether a tunnel is running, and into which namespace
//! - Enumerate plain namespaces and review-environment releases
//! - Build the session menu and dispatch start/stop/open-config actions
//! - Locate the configuration file generated for the active tunnel
//!
//! No Kubernetes API is called directly: everything goes through `kubectl`,
//! `helm`, `ps` and the `mayo` tunnel CLI, whose text output is parsed here.
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

#[cfg(test)]
mod testing;

// Re-export domain types (primary API)
pub use domain::{
    ActionItem, ActionOutcome, CommandResult, CommandSpec, Menu, MenuGroup, Namespace,
    ReleaseEntry, SessionEvent, SessionState,
};

// Re-export other commonly used types
pub use adapters::{LogNotifier, QueuedNotifier, SystemOpener, SystemRunner, Toolchain};
pub use application::{
    ActiveSessionDetector, Catalog, ConfigFileLocator, NamespaceCatalogBuilder, SessionController,
};
pub use config::{HelpLinkSetting, Settings, SettingsStore};
pub use error::{Error, Result};
pub use ports::{CommandRunner, FileOpener, NotificationSink};
