//! Opens files and links with the desktop's default handler.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::FileOpener;

#[cfg(target_os = "macos")]
const DEFAULT_OPEN_COMMAND: &str = "open";

#[cfg(not(target_os = "macos"))]
const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Hands paths and URLs to an external open command.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    /// Uses `open_command` if configured, else the platform default.
    pub fn new(open_command: Option<&str>) -> Self {
        Self {
            program: open_command.unwrap_or(DEFAULT_OPEN_COMMAND).to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn launch(&self, target: &std::ffi::OsStr) -> Result<()> {
        debug!(program = %self.program, target = ?target, "opening");

        let mut child = Command::new(&self.program)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::ProcessLaunch {
                program: self.program.clone(),
                source,
            })?;

        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FileOpener for SystemOpener {
    fn open_path(&self, path: &Path) -> Result<()> {
        self.launch(path.as_os_str())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.launch(std::ffi::OsStr::new(url))
    }
}
