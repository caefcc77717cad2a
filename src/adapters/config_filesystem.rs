use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::AppError;
use crate::ports::ConfigStore;

/// Mode MediaWiki's web server user needs to read the settings files.
#[cfg(unix)]
const SETTINGS_MODE: u32 = 0o644;

/// [`ConfigStore`] on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FilesystemConfigStore;

impl FilesystemConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for FilesystemConfigStore {
    fn read(&self, path: &Path) -> Result<Option<String>, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        // Same directory so the final rename never crosses filesystems.
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file().set_permissions(fs::Permissions::from_mode(SETTINGS_MODE))?;
        }
        file.persist(path).map_err(|err| AppError::Io(err.error))?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), AppError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
