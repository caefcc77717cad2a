use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::{AppError, CharmState};
use crate::ports::StateStore;

/// [`StateStore`] persisting JSON under the charm directory.
#[derive(Debug, Clone)]
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StateStore for JsonStateFile {
    fn load(&self) -> Result<CharmState, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| AppError::ParseError {
                what: self.path.display().to_string(),
                details: e.to_string(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(CharmState::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Written beside the target, then renamed over it.
    fn save(&self, state: &CharmState) -> Result<(), AppError> {
        let dir =
            self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(state)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| AppError::Io(err.error))?;
        Ok(())
    }
}
