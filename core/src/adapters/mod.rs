//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`,
//! plus the resolution of the CLIs those implementations invoke.

pub mod notifier;
pub mod opener;
pub mod process;
pub mod tools;

// Re-export main types for convenience
pub use notifier::{LogNotifier, QueuedNotifier};
pub use opener::SystemOpener;
pub use process::SystemRunner;
pub use tools::Toolchain;
