//! Lookup of the configuration file generated for an active tunnel.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::Namespace;

/// Searches a temp directory for files named after a namespace.
pub struct ConfigFileLocator {
    search_root: PathBuf,
}

impl ConfigFileLocator {
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: search_root.into(),
        }
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    /// Returns the first regular file whose name contains `namespace`.
    ///
    /// Order follows the directory walk and is not sorted. Unreadable entries
    /// are skipped; a missing root yields `None`.
    pub fn locate(&self, namespace: &Namespace) -> Option<PathBuf> {
        let needle = namespace.as_str();
        if needle.is_empty() {
            return None;
        }

        let found = WalkDir::new(&self.search_root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| entry.file_name().to_string_lossy().contains(needle))
            .map(|entry| entry.into_path());

        debug!(namespace = %namespace, found = ?found, "config file lookup");
        found
    }
}
