pub mod apply;
pub mod collector;
mod context;
pub mod plan;
pub mod reconciler;

pub use apply::ApplyOutcome;
pub use context::AppContext;

use tracing::{error, info};

use crate::domain::{AppError, HookEvent, Tokens, UnitStatus};
use crate::ports::{ConfigStore, Orchestrator, StateStore, System, TemplateRenderer};

/// Run one hook: collect, plan, apply.
///
/// Failing to read orchestrator state is reported as a blocked status and
/// returned as an outcome, so the hook itself never fails on it.
pub fn handle<O, S, C, T>(
    ctx: &AppContext<O, S, C, T>,
    event: HookEvent,
    renderer: &impl TemplateRenderer,
    tokens: &Tokens,
) -> Result<ApplyOutcome, AppError>
where
    O: Orchestrator,
    S: System,
    C: ConfigStore,
    T: StateStore,
{
    info!(%event, "Handling hook");

    let snapshot = match collector::collect(ctx) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!(%event, error = %err, "Failed to collect relation data");
            let status = UnitStatus::blocked("Failed to read relation data");
            ctx.orchestrator().set_status(&status)?;
            let state = ctx.state().load().unwrap_or_default();
            return Ok(ApplyOutcome { status, completed: 0, failed: Some(err.to_string()), state });
        }
    };

    let plan = reconciler::plan(event, &snapshot, tokens, renderer, ctx.settings());
    apply::apply(ctx, &snapshot.state, plan)
}
