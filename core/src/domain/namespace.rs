//! Namespace domain model and classification.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest name Kubernetes accepts for any object.
const MAX_NAME_LEN: usize = 253;

/// A Kubernetes namespace name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this namespace hosts a review environment.
    ///
    /// Classification is a plain substring test against `marker`, so a
    /// namespace such as `code-review-tools` is treated as a review namespace.
    pub fn is_review(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits `kubectl get namespaces` output into namespaces, keeping order.
///
/// Blank lines (including the one produced by the trailing newline) are dropped.
pub fn parse_namespace_list(output: &str) -> Vec<Namespace> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Namespace::from)
        .collect()
}

/// Partitions namespaces into `(plain, review)`, preserving order in both.
pub fn partition_namespaces(
    namespaces: Vec<Namespace>,
    review_marker: &str,
) -> (Vec<Namespace>, Vec<Namespace>) {
    let (review, plain): (Vec<_>, Vec<_>) = namespaces
        .into_iter()
        .partition(|ns| ns.is_review(review_marker));
    (plain, review)
}

/// Checks that a namespace or release name is safe to pass as a CLI argument.
///
/// Accepts ASCII alphanumerics, `-`, `.` and `_`; the first character must be
/// alphanumeric so the value can never be read as a flag.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || "-._".contains(c);

    let starts_alnum = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphanumeric())
        .unwrap_or(false);

    if name.len() > MAX_NAME_LEN || !starts_alnum || !name.chars().all(valid_char) {
        return Err(Error::InvalidName(format!("{} {:?}", kind, name)));
    }
    Ok(())
}
