//! Interactive session menu.

mod app;
mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::commands::{describe_outcome, AppController};
use app::App;

type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run(controller: &AppController) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, controller).await;
    let restored = restore_terminal(&mut terminal);

    // Surface the loop error first; a restore failure only matters on success
    result.and(restored)
}

fn init_terminal() -> Result<TuiTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;
    terminal.clear().context("failed to clear terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut TuiTerminal) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

async fn run_loop(terminal: &mut TuiTerminal, controller: &AppController) -> Result<()> {
    let mut app = App::new(controller.build_menu().await);
    drain_events(controller, &mut app);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('j') | KeyCode::Down => app.next(),
            KeyCode::Char('k') | KeyCode::Up => app.previous(),
            KeyCode::Char('r') => {
                app.set_status("Refreshing...");
                terminal.draw(|f| ui::draw(f, &app))?;
                app.set_menu(controller.build_menu().await);
                app.clear_status();
                drain_events(controller, &mut app);
            }
            KeyCode::Enter => {
                let Some(item) = app.selected_item().cloned() else {
                    continue;
                };
                app.set_status(format!("Running: {}", item.label()));
                terminal.draw(|f| ui::draw(f, &app))?;

                match controller.execute(&item).await {
                    Ok(outcome) => app.set_status(describe_outcome(&outcome)),
                    Err(e) => app.set_status(format!("Error: {}", e)),
                }
                drain_events(controller, &mut app);

                // The menu reflects the new session state after every action
                app.set_menu(controller.build_menu().await);
                drain_events(controller, &mut app);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Moves queued notifications into the status line, latest last.
fn drain_events(controller: &AppController, app: &mut App) {
    if let Some(event) = controller.notifier().take_pending().pop() {
        app.set_status(event.to_string());
    }
}
