//! Resolution of the external CLIs and construction of their invocations.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::domain::{validate_name, CommandSpec, Namespace};
use crate::error::Result;

/// Directories searched for bare program names, before falling back to `PATH`.
const SEARCH_DIRS: &[&str] = &[
    "/opt/homebrew/bin", // Apple Silicon
    "/usr/local/bin",    // Intel Mac / Homebrew
    "/usr/bin",          // System
    "/bin",
];

/// The CLIs the orchestrator shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    tunnel: String,
    kubectl: String,
    helm: String,
    ps: String,
    inspect_command: Option<String>,
}

impl Toolchain {
    /// Resolves every configured program.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tunnel: resolve_program(&settings.tunnel_program, SEARCH_DIRS),
            kubectl: resolve_program(&settings.kubectl_program, SEARCH_DIRS),
            helm: resolve_program(&settings.helm_program, SEARCH_DIRS),
            ps: resolve_program(&settings.ps_program, SEARCH_DIRS),
            inspect_command: settings.inspect_command.clone(),
        }
    }

    pub fn tunnel_program(&self) -> &str {
        &self.tunnel
    }

    pub fn kubectl_program(&self) -> &str {
        &self.kubectl
    }

    pub fn helm_program(&self) -> &str {
        &self.helm
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// `kubectl get namespaces`, one bare name per line.
    pub fn list_namespaces(&self) -> CommandSpec {
        CommandSpec::exec(
            &self.kubectl,
            [
                "get",
                "namespaces",
                "--no-headers",
                "-o",
                "custom-columns=:metadata.name",
            ],
        )
    }

    /// `helm list` scoped to one namespace.
    pub fn list_releases(&self, namespace: &Namespace) -> Result<CommandSpec> {
        validate_name("namespace", namespace.as_str())?;
        Ok(CommandSpec::exec(
            &self.helm,
            ["list", "--namespace", namespace.as_str()],
        ))
    }

    /// Full process listing, or the configured inspection pipeline.
    pub fn inspect_processes(&self) -> CommandSpec {
        match &self.inspect_command {
            Some(script) => CommandSpec::shell(script.clone()),
            None => CommandSpec::exec(&self.ps, ["-eo", "args"]),
        }
    }

    // =========================================================================
    // Tunnel Lifecycle
    // =========================================================================

    /// Detached, generic tunnel into a plain namespace.
    pub fn start_port_forward(&self, namespace: &Namespace) -> Result<CommandSpec> {
        validate_name("namespace", namespace.as_str())?;
        Ok(CommandSpec::exec(
            &self.tunnel,
            ["port-forward-start", "-d", "-g", "-n", namespace.as_str()],
        ))
    }

    /// Generic, foreground tunnel for one review release.
    pub fn start_review_port_forward(
        &self,
        namespace: &Namespace,
        release: &str,
    ) -> Result<CommandSpec> {
        validate_name("namespace", namespace.as_str())?;
        validate_name("release", release)?;
        Ok(CommandSpec::exec(
            &self.tunnel,
            [
                "port-forward-start",
                "-g",
                "-n",
                namespace.as_str(),
                "--release-name",
                release,
            ],
        ))
    }

    /// Global clean-up; the tunnel CLI has no namespace-scoped stop.
    pub fn clean_up(&self) -> CommandSpec {
        CommandSpec::exec(&self.tunnel, ["clean-up", "-y"])
    }
}

/// Resolves a configured program to the path that will be executed.
///
/// Values containing a path separator are used verbatim. Bare names are looked
/// up in `dirs`; if none matches the bare name is kept for `PATH` lookup.
fn resolve_program(program: &str, dirs: &[&str]) -> String {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return program.to_string();
    }

    find_executable(program, dirs)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

/// Finds an executable named `program` in the given directories.
fn find_executable(program: &str, dirs: &[&str]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| Path::new(dir).join(program))
        .find(|path| path.is_file())
}
