//! Menu assembled for the presentation layer.

use serde::Serialize;

use super::action::ActionItem;
use super::session::SessionState;

/// Titled group of actions, rendered as a submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub title: String,
    pub items: Vec<ActionItem>,
}

impl MenuGroup {
    pub fn new(title: impl Into<String>, items: Vec<ActionItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The session menu for one menu-open event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// The state the menu was built from.
    pub state: SessionState,
    pub groups: Vec<MenuGroup>,
}

impl Menu {
    /// All actions in display order.
    pub fn items(&self) -> Vec<&ActionItem> {
        self.groups.iter().flat_map(|group| group.items.iter()).collect()
    }

    /// Number of actions across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Title of the session group, embedding the active namespace if any.
    pub fn session_title(state: &SessionState) -> String {
        match state {
            SessionState::Active(Some(namespace)) => {
                format!("Port-Forward (Active in {})", namespace)
            }
            SessionState::Active(None) => "Port-Forward (Active)".to_string(),
            SessionState::Inactive => "Port-Forward (Namespace)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_title() {
        assert_eq!(
            Menu::session_title(&SessionState::Active(Some("team-a".into()))),
            "Port-Forward (Active in team-a)"
        );
        assert_eq!(
            Menu::session_title(&SessionState::Inactive),
            "Port-Forward (Namespace)"
        );
    }

    #[test]
    fn test_items_flatten_in_order() {
        let menu = Menu {
            state: SessionState::Inactive,
            groups: vec![
                MenuGroup::new(
                    "a",
                    vec![ActionItem::StartPlain {
                        namespace: "team-a".into(),
                    }],
                ),
                MenuGroup::new("empty", vec![]),
                MenuGroup::new(
                    "help",
                    vec![ActionItem::HelpLink {
                        label: "Issues".to_string(),
                        url: "https://example.com".to_string(),
                    }],
                ),
            ],
        };

        let labels: Vec<_> = menu.items().iter().map(|item| item.label()).collect();
        assert_eq!(labels, vec!["team-a", "Issues"]);
        assert_eq!(menu.len(), 2);
        assert!(!menu.is_empty());
    }
}
