//! Session actions - start, stop and open-config.

use anyhow::{bail, Result};
use mayo_menu_core::{ActionItem, Namespace, SessionState};

use super::{describe_outcome, print_events, AppController};

pub async fn start(controller: &AppController, namespace: String, json: bool) -> Result<()> {
    let item = ActionItem::StartPlain {
        namespace: Namespace::new(namespace),
    };
    execute(controller, &item, json).await
}

pub async fn review(
    controller: &AppController,
    namespace: String,
    release: String,
    json: bool,
) -> Result<()> {
    let item = ActionItem::StartReview {
        namespace: Namespace::new(namespace),
        release,
    };
    execute(controller, &item, json).await
}

pub async fn stop(controller: &AppController, json: bool) -> Result<()> {
    let state = controller.session_state().await;
    if !state.is_active() {
        print_events(controller);
        println!("No port-forward session is active.");
        return Ok(());
    }

    let item = ActionItem::Stop {
        namespace: state.namespace().cloned(),
    };
    execute(controller, &item, json).await
}

pub async fn open_config(controller: &AppController, json: bool) -> Result<()> {
    let namespace = match controller.session_state().await {
        SessionState::Active(Some(namespace)) => namespace,
        SessionState::Active(None) => {
            print_events(controller);
            bail!("The active session's namespace could not be determined");
        }
        SessionState::Inactive => {
            print_events(controller);
            bail!("No port-forward session is active");
        }
    };

    execute(controller, &ActionItem::OpenConfig { namespace }, json).await
}

async fn execute(controller: &AppController, item: &ActionItem, json: bool) -> Result<()> {
    let result = controller.execute(item).await;
    print_events(controller);

    let outcome = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", describe_outcome(&outcome));
    }
    Ok(())
}
