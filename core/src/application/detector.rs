//! Active-session detection from the OS process table.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::adapters::Toolchain;
use crate::config::Settings;
use crate::domain::{Namespace, SessionState};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Value following a `namespace` token, as in `--namespace team-a` or `namespace=team-a`.
static NAMESPACE_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"namespace[ =](\S+)").expect("namespace pattern is valid"));

/// Determines whether a tunnel is running, and into which namespace.
///
/// The running tunnel process is the only record of a session, so every call
/// inspects the process table again.
pub struct ActiveSessionDetector<R: CommandRunner> {
    runner: Arc<R>,
    toolchain: Arc<Toolchain>,
    liveness_marker: String,
    session_marker: String,
    timeout: Duration,
}

impl<R: CommandRunner> ActiveSessionDetector<R> {
    pub fn new(runner: Arc<R>, toolchain: Arc<Toolchain>, settings: &Settings) -> Self {
        Self {
            runner,
            toolchain,
            liveness_marker: settings.liveness_marker.clone(),
            session_marker: settings.session_marker.clone(),
            timeout: settings.command_timeout(),
        }
    }

    /// Inspects the process table and reports the session state.
    pub async fn try_detect(&self) -> Result<SessionState> {
        let command = self.toolchain.inspect_processes();
        let result = self.runner.run(&command, self.timeout).await?;

        if !result.success() {
            return Err(Error::CommandFailed {
                program: command.program().to_string(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }

        let state = parse_session_state(&result.stdout, &self.liveness_marker, &self.session_marker);
        debug!(state = %state, "detected session state");
        Ok(state)
    }

    /// Like `try_detect`, but an inspection failure reads as `Inactive`.
    pub async fn detect(&self) -> SessionState {
        match self.try_detect().await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "process inspection failed; assuming no session");
                SessionState::Inactive
            }
        }
    }

    /// Liveness check only; does not resolve the namespace.
    pub async fn is_active(&self) -> bool {
        self.detect().await.is_active()
    }
}

/// Derives the session state from a process listing.
///
/// A tunnel is alive only when a line carries the liveness marker. Once it is,
/// the namespace comes from the first session-marker line with a `namespace`
/// token; if none has one the state is `Active(None)`.
pub fn parse_session_state(listing: &str, liveness_marker: &str, session_marker: &str) -> SessionState {
    let processes: Vec<&str> = listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_grep_line(line))
        .collect();

    if !processes.iter().any(|line| line.contains(liveness_marker)) {
        return SessionState::Inactive;
    }

    let namespace = processes
        .iter()
        .filter(|line| line.contains(session_marker))
        .find_map(|line| extract_namespace(line));

    SessionState::Active(namespace)
}

/// Extracts the namespace argument from one process command line.
pub fn extract_namespace(line: &str) -> Option<Namespace> {
    NAMESPACE_ARG
        .captures(line)
        .map(|caps| Namespace::new(&caps[1]))
}

/// Lines produced by a `grep` in a user-supplied inspection pipeline.
///
/// `ps -ef` and `ps aux` put user, pid and time columns before the command,
/// so any token naming `grep` marks the line.
fn is_grep_line(line: &str) -> bool {
    line.split_whitespace()
        .any(|token| token == "grep" || token.ends_with("/grep"))
}
