//! Config command - show or initialize settings.

use anyhow::{bail, Result};
use mayo_menu_core::{Settings, SettingsStore, Toolchain};

pub async fn show(store: &SettingsStore, json: bool) -> Result<()> {
    let settings = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    // Bare names are shown as they resolve on this machine
    let tools = Toolchain::from_settings(&settings);

    println!("Settings file:     {}", store.config_path().display());
    println!("Tunnel CLI:        {}", tools.tunnel_program());
    println!("kubectl:           {}", tools.kubectl_program());
    println!("helm:              {}", tools.helm_program());
    println!("ps:                {}", settings.ps_program);
    if let Some(command) = &settings.inspect_command {
        println!("Inspect command:   {}", command);
    }
    println!("Review marker:     {}", settings.review_marker);
    println!("Infra marker:      {}", settings.infra_release_marker);
    println!("Liveness marker:   {}", settings.liveness_marker);
    println!("Session marker:    {}", settings.session_marker);
    println!("Config search:     {}", settings.config_search_root.display());
    println!("Command timeout:   {}s", settings.command_timeout().as_secs());
    println!(
        "Open command:      {}",
        settings.open_command.as_deref().unwrap_or("(platform default)")
    );
    for link in &settings.help_links {
        println!("Help link:         {} <{}>", link.label, link.url);
    }

    Ok(())
}

pub async fn init(store: &SettingsStore, force: bool) -> Result<()> {
    if store.config_path().exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            store.config_path().display()
        );
    }

    store.save(&Settings::default()).await?;
    println!("Wrote {}", store.config_path().display());
    Ok(())
}

pub fn path(store: &SettingsStore) {
    println!("{}", store.config_path().display());
}
