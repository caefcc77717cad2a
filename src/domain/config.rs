use serde::Deserialize;

/// Charm configuration as returned by `config-get --format=json`.
///
/// Every option falls back to its default when the orchestrator omits it, so a
/// unit deployed without any `juju config` calls still renders a usable site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CharmConfig {
    pub name: String,
    pub language: String,
    pub skin: String,
    pub logo: String,
    pub server_address: String,
    pub debug: bool,
    /// Space-separated `user:password` tokens.
    pub admins: String,
}

impl Default for CharmConfig {
    fn default() -> Self {
        Self {
            name: "Wiki".to_string(),
            language: "en".to_string(),
            skin: "vector".to_string(),
            logo: String::new(),
            server_address: String::new(),
            debug: false,
            admins: String::new(),
        }
    }
}

/// Site-level options rendered into `config.php`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    pub name: String,
    pub language: String,
    pub skin: String,
    pub logo: Option<String>,
    pub server_address: Option<String>,
    pub debug: bool,
}

impl SiteOptions {
    pub fn from_config(config: &CharmConfig) -> Self {
        let defaults = CharmConfig::default();
        Self {
            name: non_empty(&config.name).unwrap_or(defaults.name),
            language: non_empty(&config.language).unwrap_or(defaults.language),
            skin: non_empty(&config.skin).unwrap_or(defaults.skin),
            logo: non_empty(&config.logo),
            server_address: non_empty(&config.server_address),
            debug: config.debug,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
