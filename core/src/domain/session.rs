//! Observed tunnel session state.

use serde::Serialize;

use super::namespace::Namespace;

/// Whether a port-forward tunnel is running, and where.
///
/// `Active(None)` means a tunnel process is alive but its namespace could not
/// be read from the process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "namespace", rename_all = "camelCase")]
pub enum SessionState {
    Inactive,
    Active(Option<Namespace>),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The namespace of the active tunnel, when known.
    pub fn namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Active(namespace) => namespace.as_ref(),
            Self::Inactive => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Active(Some(namespace)) => write!(f, "active in {}", namespace),
            Self::Active(None) => write!(f, "active (namespace unknown)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::Inactive.to_string(), "inactive");
        assert_eq!(
            SessionState::Active(Some(Namespace::from("team-a"))).to_string(),
            "active in team-a"
        );
        assert_eq!(
            SessionState::Active(None).to_string(),
            "active (namespace unknown)"
        );
    }

    #[test]
    fn test_session_state_json() {
        let json = serde_json::to_value(SessionState::Active(Some("team-a".into()))).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["namespace"], "team-a");
    }
}
