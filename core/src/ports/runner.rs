//! Process runner port (interface).

use std::time::Duration;

use crate::domain::{CommandResult, CommandSpec};
use crate::error::Result;

/// Port for running external commands.
///
/// Every invocation of kubectl, helm, ps and the tunnel CLI goes through this
/// trait, so the process table and the cluster can be faked in tests.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion and capture its output.
    ///
    /// Fails with `ProcessLaunch` if the program cannot be spawned and with
    /// `ProcessTimeout` if it is still running after `timeout`; the child is
    /// killed in that case. A non-zero exit is not an error here.
    fn run(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<CommandResult>> + Send;

    /// Launch a command without waiting for it and return its pid.
    fn spawn(&self, command: &CommandSpec) -> Result<u32>;
}
