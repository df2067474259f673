//! File and URL opener port (interface).

use std::path::Path;

use crate::error::Result;

/// Port for handing files and links to the desktop.
pub trait FileOpener: Send + Sync {
    /// Open a file in the user's editor or viewer.
    fn open_path(&self, path: &Path) -> Result<()>;

    /// Open a URL in the browser.
    fn open_url(&self, url: &str) -> Result<()>;
}
