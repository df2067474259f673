//! External command descriptions and captured results.

use std::borrow::Cow;

use serde::Serialize;

/// A command to hand to the process runner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandSpec {
    /// An executable invoked with an argument vector (no shell involved).
    Exec { program: String, args: Vec<String> },
    /// A pipeline interpreted by `/bin/sh -c`.
    Shell(String),
}

impl CommandSpec {
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn shell(script: impl Into<String>) -> Self {
        Self::Shell(script.into())
    }

    /// Name used in logs and errors.
    pub fn program(&self) -> &str {
        match self {
            Self::Exec { program, .. } => program,
            Self::Shell(_) => "/bin/sh",
        }
    }

    /// Renders the command as a line that can be pasted into a shell.
    pub fn command_line(&self) -> String {
        match self {
            Self::Exec { program, args } => std::iter::once(program.as_str())
                .chain(args.iter().map(String::as_str))
                .map(|token| shell_escape::escape(Cow::Borrowed(token)))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Shell(script) => script.clone(),
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Exit status and captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text before the first newline, trimmed.
    pub fn first_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}
