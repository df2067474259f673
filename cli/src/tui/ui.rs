//! TUI rendering.

use mayo_menu_core::{ActionItem, Menu, SessionState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Menu
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_menu(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let (state, color) = match &app.menu.state {
        SessionState::Inactive => ("inactive".to_string(), Color::DarkGray),
        active => (active.to_string(), Color::Green),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("mayo-menu | ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(state, Style::default().fg(color).bold()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

fn draw_menu(f: &mut Frame, app: &App, area: Rect) {
    let (rows, selected_row) = menu_rows(&app.menu, app.selected);

    let list = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Sessions "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold());

    let mut state = ListState::default();
    state.select(selected_row);

    f.render_stateful_widget(list, area, &mut state);
}

/// Flattens groups into rows, returning the row of the selected item.
fn menu_rows(menu: &Menu, selected: usize) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut rows = Vec::new();
    let mut selected_row = None;
    let mut index = 0;

    for group in &menu.groups {
        rows.push(ListItem::new(Line::from(Span::styled(
            group.title.clone(),
            Style::default().fg(Color::Yellow).bold(),
        ))));

        if group.is_empty() {
            rows.push(ListItem::new(Line::from(Span::styled(
                "  (none)",
                Style::default().fg(Color::DarkGray),
            ))));
        }

        for item in &group.items {
            if index == selected {
                selected_row = Some(rows.len());
            }
            rows.push(ListItem::new(Line::from(Span::styled(
                format!("  {}", item.label()),
                Style::default().fg(item_color(item)),
            ))));
            index += 1;
        }
    }

    (rows, selected_row)
}

fn item_color(item: &ActionItem) -> Color {
    match item {
        ActionItem::StartPlain { .. } => Color::White,
        ActionItem::StartReview { .. } => Color::Magenta,
        ActionItem::Stop { .. } => Color::Red,
        ActionItem::OpenConfig { .. } => Color::Green,
        ActionItem::HelpLink { .. } => Color::Blue,
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = app.get_status().unwrap_or("");
    let help = "j/k: navigate | Enter: run | r: refresh | q: quit";

    let footer_text = if status.is_empty() {
        help.to_string()
    } else {
        format!("{} | {}", status, help)
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mayo_menu_core::{MenuGroup, Namespace};

    #[test]
    fn test_selected_row_skips_group_titles() {
        let menu = Menu {
            state: SessionState::Inactive,
            groups: vec![
                MenuGroup::new(
                    "Port-Forward (Namespace)",
                    vec![ActionItem::StartPlain {
                        namespace: Namespace::new("dev"),
                    }],
                ),
                MenuGroup::new("Port-Forward (Review)", vec![]),
                MenuGroup::new(
                    "Help",
                    vec![ActionItem::HelpLink {
                        label: "Create an issue".to_string(),
                        url: "https://example.com".to_string(),
                    }],
                ),
            ],
        };

        let (rows, selected) = menu_rows(&menu, 0);
        assert_eq!(rows.len(), 6);
        assert_eq!(selected, Some(1));

        // title, item, title, (none), title, item
        let (_, selected) = menu_rows(&menu, 1);
        assert_eq!(selected, Some(5));
    }
}
