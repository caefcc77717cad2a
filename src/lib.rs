//! mediawiki-charm: install MediaWiki and keep its settings in step with its relations.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use adapters::{
    FilesystemConfigStore, HookToolsAdapter, JsonStateFile, MinijinjaTemplateRenderer,
    SystemCommandAdapter,
};
use app::AppContext;
use domain::{HookEvent, RenderContext, TemplateId, Tokens};
use ports::TemplateRenderer;

pub use app::ApplyOutcome;
pub use domain::{AppError, Settings, UnitStatus};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MEDIAWIKI_CHARM_LOG";

/// Install the stderr subscriber. The agent copies hook stderr into the unit log.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// =============================================================================
// Hook API
// =============================================================================

/// Handle the hook named by `JUJU_DISPATCH_PATH`.
pub fn dispatch(settings: Settings) -> Result<Option<ApplyOutcome>, AppError> {
    let path = env::var("JUJU_DISPATCH_PATH")
        .map_err(|_| AppError::MissingEnv("JUJU_DISPATCH_PATH".into()))?;
    match HookEvent::from_dispatch_path(&path) {
        Ok(event) => handle(event, settings).map(Some),
        Err(AppError::UnknownHook(name)) => {
            warn!(hook = %name, "Ignoring unhandled hook");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Handle a hook by name, e.g. `db-relation-changed`.
///
/// Hooks the charm does not handle are logged and ignored, returning `None`.
pub fn run_hook(name: &str, settings: Settings) -> Result<Option<ApplyOutcome>, AppError> {
    match name.parse::<HookEvent>() {
        Ok(event) => handle(event, settings).map(Some),
        Err(AppError::UnknownHook(name)) => {
            warn!(hook = %name, "Ignoring unhandled hook");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle(event: HookEvent, settings: Settings) -> Result<ApplyOutcome, AppError> {
    let orchestrator = HookToolsAdapter::from_env()?;
    let state = JsonStateFile::new(settings.state_file());
    let ctx = AppContext::new(
        orchestrator,
        SystemCommandAdapter::new(),
        FilesystemConfigStore::new(),
        state,
        settings,
    );

    let outcome =
        app::handle(&ctx, event, &MinijinjaTemplateRenderer::new(), &Tokens::generate())?;
    info!(%event, status = %outcome.status, "Hook finished");
    Ok(outcome)
}

// =============================================================================
// Render API
// =============================================================================

/// Render one settings template from a JSON context without touching the host.
///
/// `template` is a file name (`config.php`, `db.php` or `memcached.php`).
pub fn render(template: &str, json: &str) -> Result<String, AppError> {
    let template: TemplateId = template.parse()?;
    let context = RenderContext::from_json(template, json)?;
    MinijinjaTemplateRenderer::new().render(&context)
}
