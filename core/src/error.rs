//! Error types for the mayo-menu-core library.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for session orchestration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting, starting or stopping sessions.
#[derive(Error, Debug)]
pub enum Error {
    /// The executable could not be found or spawned.
    #[error("Failed to launch {program}: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command did not finish within the allowed time.
    #[error("{program} did not finish within {}s", timeout.as_secs())]
    ProcessTimeout { program: String, timeout: Duration },

    /// The external command exited unsuccessfully.
    #[error("{program} exited with {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Failed to parse command output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// No configuration file matches the active namespace.
    #[error("No configuration file found for namespace {namespace}")]
    ConfigNotFound { namespace: String },

    /// A tunnel is already running, so another one cannot be started.
    #[error("A port-forward session is already active{}", namespace.as_deref().map(|ns| format!(" in {ns}")).unwrap_or_default())]
    SessionAlreadyActive { namespace: Option<String> },

    /// A namespace or release name is not safe to pass to a CLI.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
