use serde::{Deserialize, Serialize};

/// Connection status towards the database relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbStatus {
    #[default]
    Disconnected,
    Joined,
    Connected,
}

/// Facts this unit remembers between hook invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharmState {
    pub db_status: DbStatus,
    pub packages_installed: bool,
    /// Schema setup has run and `LocalSettings.php` includes the charm files.
    pub installed: bool,
    /// SHA-256 of the last `admins` value applied in full.
    pub admins_digest: Option<String>,
    /// Secret key in use when no peer has published one.
    pub secret_key: Option<String>,
}

/// A single change to [`CharmState`], applied once the preceding actions succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    DbStatus(DbStatus),
    PackagesInstalled,
    Installed(bool),
    AdminsApplied(String),
    SecretKey(String),
}

impl CharmState {
    pub fn apply(&mut self, change: &StateChange) {
        match change {
            StateChange::DbStatus(status) => self.db_status = *status,
            StateChange::PackagesInstalled => self.packages_installed = true,
            StateChange::Installed(installed) => {
                self.installed = *installed;
                if !installed {
                    self.admins_digest = None;
                }
            }
            StateChange::AdminsApplied(digest) => self.admins_digest = Some(digest.clone()),
            StateChange::SecretKey(key) => self.secret_key = Some(key.clone()),
        }
    }
}
