use tracing::{debug, error, info};

use crate::domain::render::link_local_settings;
use crate::domain::{AppError, CharmState, UnitStatus};
use crate::ports::{ConfigStore, Orchestrator, StateStore, System};

use super::AppContext;
use super::plan::{Action, Plan};
use super::reconciler::{BOOTSTRAP_ADMIN, WEB_SERVICE};

/// What happened when a plan was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub status: UnitStatus,
    /// Number of steps that completed.
    pub completed: usize,
    /// Description of the step that failed, if any.
    pub failed: Option<String>,
    pub state: CharmState,
}

/// Execute `plan` step by step, stopping at the first failure.
///
/// State reached so far is saved and the status reported either way; a failed
/// step is surfaced as status, not as an error.
pub fn apply<O, S, C, T>(
    ctx: &AppContext<O, S, C, T>,
    initial: &CharmState,
    plan: Plan,
) -> Result<ApplyOutcome, AppError>
where
    O: Orchestrator,
    S: System,
    C: ConfigStore,
    T: StateStore,
{
    let mut state = initial.clone();
    let mut status = plan.status.clone();
    let mut completed = 0;
    let mut failed = None;

    for step in plan.steps {
        match execute(ctx, &step.action, &mut state) {
            Ok(()) => completed += 1,
            Err(err) => {
                error!(action = %step.action, error = %err, "Step failed");
                let _ = ctx.orchestrator().log(&format!("{}: {}", step.action, err));
                status = step.on_failure;
                failed = Some(step.action.to_string());
                break;
            }
        }
    }

    ctx.state().save(&state)?;
    ctx.orchestrator().set_status(&status)?;
    info!(%status, completed, "Reconciled");

    Ok(ApplyOutcome { status, completed, failed, state })
}

fn execute<O, S, C, T>(
    ctx: &AppContext<O, S, C, T>,
    action: &Action,
    state: &mut CharmState,
) -> Result<(), AppError>
where
    O: Orchestrator,
    S: System,
    C: ConfigStore,
    T: StateStore,
{
    let settings = ctx.settings();
    match action {
        Action::InstallPackages(packages) => ctx.system().install_packages(packages),
        Action::OpenPort(port) => ctx.orchestrator().open_port(*port),
        Action::Write(file) => {
            if ctx.files().read(&file.path)?.as_deref() == Some(file.content.as_str()) {
                debug!(path = %file.path.display(), "Unchanged");
                return Ok(());
            }
            info!(path = %file.path.display(), "Writing");
            ctx.files().write_atomic(&file.path, &file.content)
        }
        Action::Remove(path) => {
            info!(path = %path.display(), "Removing");
            ctx.files().remove(path)
        }
        Action::SetupSchema { database, site_name, language, admin_password } => {
            let config_dir = settings.config_dir().display().to_string();
            let args = vec![
                "--dbtype".to_string(),
                "mysql".to_string(),
                "--dbserver".to_string(),
                database.host.clone(),
                "--dbname".to_string(),
                database.database.clone(),
                "--dbuser".to_string(),
                database.user.clone(),
                "--dbpass".to_string(),
                database.password.clone(),
                "--installdbuser".to_string(),
                database.user.clone(),
                "--installdbpass".to_string(),
                database.password.clone(),
                "--confpath".to_string(),
                config_dir,
                "--lang".to_string(),
                language.clone(),
                "--pass".to_string(),
                admin_password.clone(),
                site_name.clone(),
                BOOTSTRAP_ADMIN.to_string(),
            ];
            ctx.system().run_maintenance(&settings.maintenance_script("install.php"), &args)
        }
        Action::LinkSettings => {
            let path = settings.local_settings();
            let existing = ctx.files().read(&path)?.ok_or_else(|| {
                AppError::config_error(format!("{} does not exist", path.display()))
            })?;
            match link_local_settings(&existing, settings.config_dir()) {
                Some(linked) => ctx.files().write_atomic(&path, &linked),
                None => Ok(()),
            }
        }
        Action::CreateAdmin(account) => {
            let args = vec![
                "--conf".to_string(),
                settings.local_settings().display().to_string(),
                "--force".to_string(),
                "--sysop".to_string(),
                "--bureaucrat".to_string(),
                account.username.clone(),
                account.password.clone(),
            ];
            let script = settings.maintenance_script("createAndPromote.php");
            ctx.system().run_maintenance(&script, &args)
        }
        Action::ReloadWebServer => ctx.system().reload_service(WEB_SERVICE),
        Action::Publish { relation_id, data, app } => {
            ctx.orchestrator().relation_set(relation_id, data, *app)
        }
        Action::Record(change) => {
            state.apply(change);
            Ok(())
        }
    }
}
