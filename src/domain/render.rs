use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AppError, CacheServer, DatabaseConnectionInfo, SiteOptions};

/// Embedded templates, one per rendered settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    SiteSettings,
    Database,
    Cache,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] =
        [TemplateId::SiteSettings, TemplateId::Database, TemplateId::Cache];

    /// Template name, which is also the rendered file name.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateId::SiteSettings => "config.php",
            TemplateId::Database => "db.php",
            TemplateId::Cache => "memcached.php",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for TemplateId {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.file_name() == name)
            .ok_or_else(|| AppError::UnknownTemplate(name.to_string()))
    }
}

/// Values substituted into `config.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContext {
    pub name: String,
    pub language: String,
    pub skin: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub server_address: Option<String>,
    /// Set only when debugging is enabled.
    #[serde(default)]
    pub debug_log: Option<String>,
    pub secret_key: String,
}

impl SiteContext {
    pub fn new(site: &SiteOptions, secret_key: &str, debug_log: &Path) -> Self {
        Self {
            name: site.name.clone(),
            language: site.language.clone(),
            skin: site.skin.clone(),
            logo: site.logo.clone(),
            server_address: site.server_address.clone(),
            debug_log: site.debug.then(|| debug_log.display().to_string()),
            secret_key: secret_key.to_string(),
        }
    }
}

/// Values substituted into `memcached.php`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheContext {
    pub servers: Vec<CacheServer>,
}

/// Input for one template render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderContext {
    Site(SiteContext),
    Database(DatabaseConnectionInfo),
    Cache(CacheContext),
}

impl RenderContext {
    pub fn template(&self) -> TemplateId {
        match self {
            RenderContext::Site(_) => TemplateId::SiteSettings,
            RenderContext::Database(_) => TemplateId::Database,
            RenderContext::Cache(_) => TemplateId::Cache,
        }
    }

    /// Decode a JSON document into the context expected by `template`.
    pub fn from_json(template: TemplateId, json: &str) -> Result<Self, AppError> {
        let context = match template {
            TemplateId::SiteSettings => RenderContext::Site(serde_json::from_str(json)?),
            TemplateId::Database => RenderContext::Database(serde_json::from_str(json)?),
            TemplateId::Cache => RenderContext::Cache(serde_json::from_str(json)?),
        };
        Ok(context)
    }
}

/// A settings file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub template: TemplateId,
    pub path: PathBuf,
    pub content: String,
}

const INCLUDE_BEGIN: &str = "# BEGIN mediawiki-charm";
const INCLUDE_END: &str = "# END mediawiki-charm";

/// Append the include block for the charm-rendered files to `LocalSettings.php`.
///
/// Returns `None` when the block is already present.
pub fn link_local_settings(existing: &str, config_dir: &Path) -> Option<String> {
    if existing.contains(INCLUDE_BEGIN) {
        return None;
    }

    let mut content = existing.to_string();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push('\n');
    content.push_str(INCLUDE_BEGIN);
    content.push('\n');
    for template in [TemplateId::Database, TemplateId::Cache, TemplateId::SiteSettings] {
        let path = config_dir.join(template.file_name());
        let path = php_escape(&path.display().to_string());
        content.push_str(&format!("if ( is_readable( '{path}' ) ) {{ include '{path}'; }}\n"));
    }
    content.push_str(INCLUDE_END);
    content.push('\n');
    Some(content)
}

/// Escape a value for use inside a single-quoted PHP string literal.
pub fn php_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
