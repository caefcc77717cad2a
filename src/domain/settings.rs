use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = "/etc/mediawiki";
pub const DEFAULT_MAINTENANCE_DIR: &str = "/usr/share/mediawiki/maintenance";

/// Directory under the charm dir holding persisted unit state.
pub const STATE_DIR: &str = ".mediawiki-charm";

/// Filesystem locations used by the charm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where MediaWiki reads `LocalSettings.php` and the charm-rendered files.
    pub config_dir: PathBuf,
    /// The unpacked charm; working directory of every hook.
    pub charm_dir: PathBuf,
    /// MediaWiki maintenance scripts.
    pub maintenance_dir: PathBuf,
}

impl Settings {
    pub fn new(config_dir: PathBuf, charm_dir: PathBuf, maintenance_dir: PathBuf) -> Self {
        Self { config_dir, charm_dir, maintenance_dir }
    }

    pub fn config_file(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    pub fn local_settings(&self) -> PathBuf {
        self.config_dir.join("LocalSettings.php")
    }

    pub fn debug_log(&self) -> PathBuf {
        self.charm_dir.join("debug.log")
    }

    pub fn state_file(&self) -> PathBuf {
        self.charm_dir.join(STATE_DIR).join("state.json")
    }

    pub fn maintenance_script(&self, name: &str) -> PathBuf {
        self.maintenance_dir.join(name)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_CONFIG_DIR),
            PathBuf::from("."),
            PathBuf::from(DEFAULT_MAINTENANCE_DIR),
        )
    }
}
