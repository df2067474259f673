//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the collaborators the application layer talks to.
//! Implementations live in `adapters`; tests substitute scripted fakes.

mod notifier;
mod opener;
mod runner;

pub use notifier::NotificationSink;
pub use opener::FileOpener;
pub use runner::CommandRunner;
