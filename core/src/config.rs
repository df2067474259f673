//! Configuration management for tool paths, markers and timeouts.
//!
//! Stores settings in JSON format at `~/.mayo-menu/config.json`.
//! Every field has a default, so a missing or partial file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Issue tracker linked from the help group.
const DEFAULT_HELP_URL: &str = "https://gitlab.wiremind.io/groups/wiremind/devops/-/issues";

/// Settings data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Tunnel-management CLI.
    #[serde(default = "default_tunnel_program")]
    pub tunnel_program: String,

    #[serde(default = "default_kubectl_program")]
    pub kubectl_program: String,

    #[serde(default = "default_helm_program")]
    pub helm_program: String,

    #[serde(default = "default_ps_program")]
    pub ps_program: String,

    /// Namespaces containing this substring are review namespaces.
    #[serde(default = "default_review_marker")]
    pub review_marker: String,

    /// Release lines containing this substring are infrastructure noise.
    #[serde(default = "default_infra_release_marker")]
    pub infra_release_marker: String,

    /// Process marker proving a tunnel is alive.
    #[serde(default = "default_liveness_marker")]
    pub liveness_marker: String,

    /// Marker of the process whose arguments carry the namespace.
    #[serde(default = "default_session_marker")]
    pub session_marker: String,

    /// Shell pipeline replacing the built-in process listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect_command: Option<String>,

    /// Directory searched for generated tunnel configuration files.
    #[serde(default = "default_config_search_root")]
    pub config_search_root: PathBuf,

    /// Upper bound for every external command, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Program used to open files and URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_command: Option<String>,

    #[serde(default = "default_help_links")]
    pub help_links: Vec<HelpLinkSetting>,
}

/// A static link shown in the help group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLinkSetting {
    pub label: String,
    pub url: String,
}

fn default_tunnel_program() -> String {
    "/usr/local/bin/mayo".to_string()
}

fn default_kubectl_program() -> String {
    "kubectl".to_string()
}

fn default_helm_program() -> String {
    "helm".to_string()
}

fn default_ps_program() -> String {
    "ps".to_string()
}

fn default_review_marker() -> String {
    "review".to_string()
}

fn default_infra_release_marker() -> String {
    "gitlab".to_string()
}

fn default_liveness_marker() -> String {
    "vpn-tcp".to_string()
}

fn default_session_marker() -> String {
    "port-forward".to_string()
}

fn default_config_search_root() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_command_timeout_secs() -> u64 {
    15
}

fn default_help_links() -> Vec<HelpLinkSetting> {
    vec![HelpLinkSetting {
        label: "Create an issue".to_string(),
        url: DEFAULT_HELP_URL.to_string(),
    }]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tunnel_program: default_tunnel_program(),
            kubectl_program: default_kubectl_program(),
            helm_program: default_helm_program(),
            ps_program: default_ps_program(),
            review_marker: default_review_marker(),
            infra_release_marker: default_infra_release_marker(),
            liveness_marker: default_liveness_marker(),
            session_marker: default_session_marker(),
            inspect_command: None,
            config_search_root: default_config_search_root(),
            command_timeout_secs: default_command_timeout_secs(),
            open_command: None,
            help_links: default_help_links(),
        }
    }
}

impl Settings {
    /// Bounded wait applied to every external invocation.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }
}

/// Settings store handling reading and writing `config.json`.
pub struct SettingsStore {
    config_path: PathBuf,
}

impl SettingsStore {
    /// Create a new settings store with the default path.
    ///
    /// Default path: `~/.mayo-menu/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".mayo-menu").join("config.json"),
        })
    }

    /// Create a settings store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load settings from disk.
    ///
    /// Returns defaults if the file doesn't exist.
    pub async fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save settings to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (SettingsStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        (SettingsStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let settings = store.load().await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tunnel_program, "/usr/local/bin/mayo");
        assert_eq!(settings.command_timeout(), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store();

        let settings = Settings {
            review_marker: "preview".to_string(),
            inspect_command: Some("ps -ef".to_string()),
            command_timeout_secs: 3,
            help_links: vec![],
            ..Settings::default()
        };
        store.save(&settings).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, settings);
        assert!(!store.config_path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        std::fs::write(store.config_path(), r#"{"helmProgram": "/opt/helm"}"#).unwrap();

        let settings = store.load().await.unwrap();
        assert_eq!(settings.helm_program, "/opt/helm");
        assert_eq!(settings.kubectl_program, "kubectl");
        assert_eq!(settings.help_links.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_file() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        std::fs::write(store.config_path(), "not json").unwrap();

        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let settings = Settings {
            command_timeout_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.command_timeout(), Duration::from_secs(1));
    }
}
