//! Menu command - show the actions available right now.

use anyhow::Result;

use super::{print_events, AppController};

pub async fn run(controller: &AppController, json: bool) -> Result<()> {
    let menu = controller.build_menu().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&menu)?);
        print_events(controller);
        return Ok(());
    }

    for group in &menu.groups {
        println!("{}", group.title);
        if group.is_empty() {
            println!("  (none)");
        }
        for item in &group.items {
            println!("  {:<12} {}", item.kind(), item.label());
        }
        println!();
    }

    print_events(controller);
    Ok(())
}
