//! Scripted collaborators shared by the unit tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::RwLock;

use crate::config::Settings;
use crate::domain::{CommandResult, CommandSpec};
use crate::error::{Error, Result};
use crate::ports::{CommandRunner, FileOpener};

/// Pid reported for every fake launch.
pub const FAKE_PID: u32 = 4242;

/// Settings pointing every program at a fixed fake path.
pub fn fake_settings() -> Settings {
    Settings {
        tunnel_program: "/fake/mayo".to_string(),
        kubectl_program: "/fake/kubectl".to_string(),
        helm_program: "/fake/helm".to_string(),
        ps_program: "/fake/ps".to_string(),
        ..Settings::default()
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandResult),
    LaunchFailure,
    Timeout,
}

/// Runner answering from a script; unscripted commands behave like missing programs.
#[derive(Debug, Default)]
pub struct FakeRunner {
    scripts: RwLock<Vec<(CommandSpec, Scripted)>>,
    calls: RwLock<Vec<CommandSpec>>,
    spawned: RwLock<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(self, command: CommandSpec, stdout: &str) -> Self {
        self.set(command, Scripted::Output(CommandResult::new(Some(0), stdout, "")));
        self
    }

    pub fn with_exit(self, command: CommandSpec, code: i32, stderr: &str) -> Self {
        self.set(command, Scripted::Output(CommandResult::new(Some(code), "", stderr)));
        self
    }

    pub fn with_launch_failure(self, command: CommandSpec) -> Self {
        self.set(command, Scripted::LaunchFailure);
        self
    }

    pub fn with_timeout(self, command: CommandSpec) -> Self {
        self.set(command, Scripted::Timeout);
        self
    }

    /// Replaces the scripted output of `command`, e.g. after a tunnel starts.
    pub fn set_output(&self, command: CommandSpec, stdout: &str) {
        self.set(command, Scripted::Output(CommandResult::new(Some(0), stdout, "")));
    }

    fn set(&self, command: CommandSpec, scripted: Scripted) {
        let mut scripts = self.scripts.write();
        scripts.retain(|(existing, _)| *existing != command);
        scripts.push((command, scripted));
    }

    fn lookup(&self, command: &CommandSpec) -> Option<Scripted> {
        self.scripts
            .read()
            .iter()
            .find(|(existing, _)| existing == command)
            .map(|(_, scripted)| scripted.clone())
    }

    /// Commands passed to `run`, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.read().clone()
    }

    /// Commands passed to `spawn`, in order.
    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.spawned.read().clone()
    }

    fn launch_error(command: &CommandSpec) -> Error {
        Error::ProcessLaunch {
            program: command.program().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
        }
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &CommandSpec, timeout: Duration) -> Result<CommandResult> {
        self.calls.write().push(command.clone());

        match self.lookup(command) {
            Some(Scripted::Output(result)) => Ok(result),
            Some(Scripted::Timeout) => Err(Error::ProcessTimeout {
                program: command.program().to_string(),
                timeout,
            }),
            Some(Scripted::LaunchFailure) | None => Err(Self::launch_error(command)),
        }
    }

    fn spawn(&self, command: &CommandSpec) -> Result<u32> {
        if let Some(Scripted::LaunchFailure) = self.lookup(command) {
            return Err(Self::launch_error(command));
        }
        self.spawned.write().push(command.clone());
        Ok(FAKE_PID)
    }
}

/// Opener recording what it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    paths: RwLock<Vec<PathBuf>>,
    urls: RwLock<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.read().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.read().clone()
    }
}

impl FileOpener for RecordingOpener {
    fn open_path(&self, path: &Path) -> Result<()> {
        self.paths.write().push(path.to_path_buf());
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.urls.write().push(url.to_string());
        Ok(())
    }
}
