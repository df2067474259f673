//! Subcommand implementations.

pub mod action;
pub mod config;
pub mod menu;
pub mod status;

use std::path::PathBuf;

use anyhow::Result;
use mayo_menu_core::{
    ActionOutcome, QueuedNotifier, SessionController, SettingsStore, SystemOpener, SystemRunner,
};

/// Controller wired to the real OS collaborators.
pub type AppController = SessionController<SystemRunner, QueuedNotifier, SystemOpener>;

pub fn settings_store(path: Option<PathBuf>) -> Result<SettingsStore> {
    Ok(match path {
        Some(path) => SettingsStore::with_path(path),
        None => SettingsStore::new()?,
    })
}

/// Loads settings and builds the controller.
pub async fn session(store: &SettingsStore) -> Result<AppController> {
    let settings = store.load().await?;
    let opener = SystemOpener::new(settings.open_command.as_deref());
    Ok(SessionController::new(
        SystemRunner::new(),
        QueuedNotifier::new(),
        opener,
        &settings,
    ))
}

/// Prints and clears pending notifications.
pub fn print_events(controller: &AppController) {
    for event in controller.notifier().take_pending() {
        if event.is_failure() {
            eprintln!("! {}", event);
        } else {
            println!("{}", event);
        }
    }
}

/// One-line summary of an executed action.
pub fn describe_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Completed(result) => {
            let output = result.first_line();
            if output.is_empty() {
                "Done".to_string()
            } else {
                format!("Done: {}", output)
            }
        }
        ActionOutcome::Launched { pid } => format!("Launched (pid {})", pid),
        ActionOutcome::Opened { path } => format!("Opened {}", path.display()),
        ActionOutcome::Browsed { url } => format!("Opened {}", url),
    }
}
