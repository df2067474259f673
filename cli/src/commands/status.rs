//! Status command - report the current session.

use anyhow::Result;

use super::{print_events, AppController};

pub async fn run(controller: &AppController, json: bool) -> Result<()> {
    let state = controller.session_state().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("Port-forward: {}", state);
    }

    print_events(controller);
    Ok(())
}
