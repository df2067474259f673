//! Domain layer - Pure business logic and data models.
//!
//! This module contains the entities the session orchestrator reasons about.
//! These types have no I/O dependencies and can be tested in isolation.

mod action;
mod command;
mod event;
mod menu;
mod namespace;
mod release;
mod session;

// Re-export all domain types
pub use action::{ActionItem, ActionOutcome};
pub use command::{CommandResult, CommandSpec};
pub use event::SessionEvent;
pub use menu::{Menu, MenuGroup};
pub use namespace::{partition_namespaces, parse_namespace_list, validate_name, Namespace};
pub use release::{is_release_noise, parse_release_line, ReleaseEntry};
pub use session::SessionState;
