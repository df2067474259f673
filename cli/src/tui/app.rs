//! TUI application state.

use mayo_menu_core::{ActionItem, Menu};

pub struct App {
    pub menu: Menu,
    pub selected: usize,
    status: Option<String>,
}

impl App {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            selected: 0,
            status: None,
        }
    }

    /// Replaces the menu, keeping the selection in range.
    pub fn set_menu(&mut self, menu: Menu) {
        self.menu = menu;
        let len = self.menu.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn next(&mut self) {
        let len = self.menu.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous(&mut self) {
        let len = self.menu.len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn selected_item(&self) -> Option<&ActionItem> {
        self.menu.items().get(self.selected).copied()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn get_status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mayo_menu_core::{MenuGroup, Namespace, SessionState};

    fn menu(names: &[&str]) -> Menu {
        Menu {
            state: SessionState::Inactive,
            groups: vec![MenuGroup::new(
                "Port-Forward (Namespace)",
                names
                    .iter()
                    .map(|n| ActionItem::StartPlain {
                        namespace: Namespace::new(*n),
                    })
                    .collect(),
            )],
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = App::new(menu(&["a", "b", "c"]));
        app.previous();
        assert_eq!(app.selected, 2);
        app.next();
        assert_eq!(app.selected, 0);
        app.next();
        assert_eq!(app.selected_item().map(|i| i.label()), Some("b".to_string()));
    }

    #[test]
    fn test_set_menu_clamps_selection() {
        let mut app = App::new(menu(&["a", "b", "c"]));
        app.selected = 2;
        app.set_menu(menu(&["a"]));
        assert_eq!(app.selected, 0);

        app.set_menu(menu(&[]));
        assert!(app.selected_item().is_none());
        app.next();
        assert_eq!(app.selected, 0);
    }
}
