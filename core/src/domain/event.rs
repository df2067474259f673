//! Lifecycle events handed to the notification sink.

use serde::Serialize;

use super::namespace::Namespace;

/// Notification types for session lifecycle changes and failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    PortForwardStarted {
        namespace: Namespace,
    },
    ReviewPortForwardStarted {
        namespace: Namespace,
        release: String,
    },
    PortForwardStopped {
        namespace: Option<Namespace>,
    },
    /// Namespaces could not be listed; the menu is degraded.
    CatalogUnavailable {
        message: String,
    },
    ConfigNotFound {
        namespace: Namespace,
    },
    ActionFailed {
        action: String,
        message: String,
    },
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PortForwardStarted { .. } => "started",
            Self::ReviewPortForwardStarted { .. } => "reviewStarted",
            Self::PortForwardStopped { .. } => "stopped",
            Self::CatalogUnavailable { .. } => "catalogUnavailable",
            Self::ConfigNotFound { .. } => "configNotFound",
            Self::ActionFailed { .. } => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::CatalogUnavailable { .. } | Self::ConfigNotFound { .. } | Self::ActionFailed { .. }
        )
    }

    /// Human readable text for the notification.
    pub fn message(&self) -> String {
        match self {
            Self::PortForwardStarted { namespace } => {
                format!("Port-forward started in {}", namespace)
            }
            Self::ReviewPortForwardStarted { namespace, release } => {
                format!("Port-forward started for review {}/{}", namespace, release)
            }
            Self::PortForwardStopped {
                namespace: Some(namespace),
            } => format!("Port-forward stopped ({})", namespace),
            Self::PortForwardStopped { namespace: None } => "Port-forward stopped".to_string(),
            Self::CatalogUnavailable { message } => {
                format!("Could not list namespaces: {}", message)
            }
            Self::ConfigNotFound { namespace } => {
                format!("No configuration file found for {}", namespace)
            }
            Self::ActionFailed { action, message } => format!("{} failed: {}", action, message),
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
