use std::path::Path;

use crate::domain::AppError;

/// Port for the settings files consumed by MediaWiki.
pub trait ConfigStore {
    /// Read a file, returning `None` when it does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>, AppError>;

    /// Replace a file's content. The previous content stays intact unless the
    /// new content was written in full.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Remove a file. Removing a missing file succeeds.
    fn remove(&self, path: &Path) -> Result<(), AppError>;

    fn exists(&self, path: &Path) -> bool;
}
