//! Menu actions and the outcome of executing them.

use std::path::PathBuf;

use serde::Serialize;

use super::command::CommandResult;
use super::namespace::Namespace;

/// One entry of the session menu.
///
/// Actions are produced fresh on every menu build and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ActionItem {
    /// Start a detached tunnel into a plain namespace.
    StartPlain { namespace: Namespace },
    /// Start a tunnel for one release of a review namespace.
    StartReview {
        namespace: Namespace,
        release: String,
    },
    /// Tear down the running tunnel.
    ///
    /// The tunnel CLI only offers a global clean-up, so every session goes
    /// down regardless of `namespace`.
    Stop { namespace: Option<Namespace> },
    /// Open the generated configuration file of the active namespace.
    OpenConfig { namespace: Namespace },
    HelpLink { label: String, url: String },
}

impl ActionItem {
    /// Display text for the menu.
    pub fn label(&self) -> String {
        match self {
            Self::StartPlain { namespace } => namespace.to_string(),
            Self::StartReview { namespace, release } => format!("{}/{}", namespace, release),
            Self::Stop { .. } => "Stop port-forward".to_string(),
            Self::OpenConfig { .. } => "Open your configuration file".to_string(),
            Self::HelpLink { label, .. } => label.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartPlain { .. } => "startPlain",
            Self::StartReview { .. } => "startReview",
            Self::Stop { .. } => "stop",
            Self::OpenConfig { .. } => "openConfig",
            Self::HelpLink { .. } => "helpLink",
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Self::StartPlain { .. } | Self::StartReview { .. })
    }
}

impl std::fmt::Display for ActionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// What happened when an action was executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ActionOutcome {
    /// The command ran to completion.
    Completed(CommandResult),
    /// A long-running tunnel was launched and left running.
    Launched { pid: u32 },
    /// A file was handed to the opener.
    Opened { path: PathBuf },
    /// A URL was handed to the opener.
    Browsed { url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        let plain = ActionItem::StartPlain {
            namespace: "team-a".into(),
        };
        assert_eq!(plain.label(), "team-a");
        assert!(plain.is_start());

        let review = ActionItem::StartReview {
            namespace: "review-1".into(),
            release: "myrelease".to_string(),
        };
        assert_eq!(review.label(), "review-1/myrelease");
        assert!(review.is_start());

        let stop = ActionItem::Stop { namespace: None };
        assert_eq!(stop.label(), "Stop port-forward");
        assert!(!stop.is_start());
    }

    #[test]
    fn test_action_json() {
        let review = ActionItem::StartReview {
            namespace: "review-x".into(),
            release: "relA".to_string(),
        };
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["action"], "startReview");
        assert_eq!(json["namespace"], "review-x");
        assert_eq!(json["release"], "relA");
        assert_eq!(review.kind(), "startReview");
    }
}
