//! Process runner backed by real OS processes.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::{CommandResult, CommandSpec};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Shell used for `CommandSpec::Shell` pipelines.
const SHELL: &str = "/bin/sh";

/// Runs commands as child processes with a bounded wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn program_and_args(command: &CommandSpec) -> (&str, Vec<&str>) {
    match command {
        CommandSpec::Exec { program, args } => {
            (program.as_str(), args.iter().map(String::as_str).collect())
        }
        CommandSpec::Shell(script) => (SHELL, vec!["-c", script.as_str()]),
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec, timeout: Duration) -> Result<CommandResult> {
        let (program, args) = program_and_args(command);
        debug!(command = %command, "running command");

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::ProcessLaunch {
                program: program.to_string(),
                source,
            })?;

        // Dropping the pending future on timeout drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let result = CommandResult::new(
                    output.status.code(),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                );
                debug!(command = %command, exit_code = ?result.exit_code, "command finished");
                Ok(result)
            }
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => {
                warn!(command = %command, timeout_secs = timeout.as_secs(), "command timed out");
                Err(Error::ProcessTimeout {
                    program: program.to_string(),
                    timeout,
                })
            }
        }
    }

    fn spawn(&self, command: &CommandSpec) -> Result<u32> {
        let (program, args) = program_and_args(command);
        debug!(command = %command, "launching command");

        let mut child = std::process::Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::ProcessLaunch {
                program: program.to_string(),
                source,
            })?;

        let pid = child.id();

        // Reap the child when it exits to avoid zombies
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_output() {
        let runner = SystemRunner::new();
        let result = runner
            .run(
                &CommandSpec::exec("/bin/echo", ["team-a"]),
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.first_line(), "team-a");
    }

    #[tokio::test]
    async fn test_run_shell_pipeline() {
        let runner = SystemRunner::new();
        let result = runner
            .run(
                &CommandSpec::shell("printf 'a\\nb\\n' | wc -l"),
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert_eq!(result.first_line(), "2");
    }

    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let runner = SystemRunner::new();
        let result = runner
            .run(&CommandSpec::shell("exit 3"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(3));
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let runner = SystemRunner::new();
        let result = runner
            .run(
                &CommandSpec::exec("/nonexistent/mayo", Vec::<String>::new()),
                Duration::from_secs(5),
            )
            .await;

        assert!(matches!(result, Err(Error::ProcessLaunch { .. })));
        assert!(matches!(
            runner.spawn(&CommandSpec::exec("/nonexistent/mayo", Vec::<String>::new())),
            Err(Error::ProcessLaunch { .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let runner = SystemRunner::new();
        let result = runner
            .run(
                &CommandSpec::exec("/bin/sleep", ["5"]),
                Duration::from_millis(100),
            )
            .await;

        assert!(matches!(result, Err(Error::ProcessTimeout { .. })));
    }

    #[test]
    fn test_spawn_returns_pid() {
        let runner = SystemRunner::new();
        let pid = runner.spawn(&CommandSpec::exec("/bin/true", Vec::<String>::new())).unwrap();
        assert!(pid > 0);
    }
}
