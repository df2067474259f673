//! Review release domain model and `helm list` line parsing.

use serde::{Deserialize, Serialize};

use super::namespace::Namespace;
use crate::error::{Error, Result};

/// A release deployed in a review namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub release: String,
    pub namespace: Namespace,
}

impl ReleaseEntry {
    pub fn new(release: impl Into<String>, namespace: impl Into<Namespace>) -> Self {
        Self {
            release: release.into(),
            namespace: namespace.into(),
        }
    }

    /// Returns the menu label in the format "namespace/release".
    pub fn label(&self) -> String {
        format!("{}/{}", self.namespace, self.release)
    }
}

/// Whether a release-listing line carries no release.
///
/// Blank lines, the `NAME ...` header and infrastructure releases (lines
/// containing `infra_marker`) are noise.
pub fn is_release_noise(line: &str, infra_marker: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.split_whitespace().next() == Some("NAME")
        || (!infra_marker.is_empty() && trimmed.contains(infra_marker))
}

/// Parses one release row: the first field is the release, the second the namespace.
///
/// Table borders (`|`) are treated as whitespace.
pub fn parse_release_line(line: &str) -> Result<ReleaseEntry> {
    let normalized = line.replace('|', " ");
    let mut fields = normalized.split_whitespace();

    match (fields.next(), fields.next()) {
        (Some(release), Some(namespace)) => Ok(ReleaseEntry::new(release, namespace)),
        _ => Err(Error::ParseError(format!(
            "release line has fewer than two fields: {:?}",
            line
        ))),
    }
}
