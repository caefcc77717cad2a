//! Lifecycle reconciler.
//!
//! Maps an event and a [`Snapshot`] to a [`Plan`]. Planning performs no I/O:
//! randomness comes in through [`Tokens`] and rendering is pure, so the same
//! inputs always produce the same plan.

use tracing::warn;

use crate::domain::{
    AppError, CacheContext, DbStatus, HookEvent, Relation, RelationData, RelationHook,
    RenderContext, RenderedFile, Settings, SiteContext, StateChange, TemplateId, Tokens,
    UnitStatus, admins_digest, parse_admins,
};
use crate::ports::TemplateRenderer;

use super::collector::{SCHEMA_READY, SECRET_KEY, Snapshot};
use super::plan::{Action, Plan};

pub const PACKAGES: [&str; 3] = ["mediawiki", "imagemagick", "php-memcached"];
pub const HTTP_PORT: u16 = 80;
pub const WEB_SERVICE: &str = "apache2";
/// Account created by the schema setup; operators manage their own via `admins`.
pub const BOOTSTRAP_ADMIN: &str = "charm_admin";

const INSTALL_FAILED: &str = "Failed to install packages";
const CONFIGURE_FAILED: &str = "Failed to configure mediawiki";
const SETUP_FAILED: &str = "Failed to install mediawiki";
const CACHE_FAILED: &str = "Failed to configure cache";
const UNINSTALL_FAILED: &str = "Failed to uninstall mediawiki";
const ADMIN_FAILED: &str = "Failed to create admin accounts";
const PUBLISH_FAILED: &str = "Failed to publish relation data";

/// Build the plan for one hook.
pub fn plan(
    event: HookEvent,
    snapshot: &Snapshot,
    tokens: &Tokens,
    renderer: &impl TemplateRenderer,
    settings: &Settings,
) -> Plan {
    let planner = Planner { snapshot, tokens, renderer, settings };
    let mut plan = Plan::new(&snapshot.state);

    let result = match event {
        HookEvent::Install => planner.install(&mut plan, false),
        HookEvent::UpgradeCharm => planner.install(&mut plan, true),
        HookEvent::Start => Ok(()),
        HookEvent::ConfigChanged => planner.reconcile_all(&mut plan),
        HookEvent::LeaderElected => planner.peers_changed(&mut plan),
        HookEvent::Relation(Relation::Db, RelationHook::Joined | RelationHook::Changed) => {
            planner.database_changed(&mut plan)
        }
        HookEvent::Relation(Relation::Db, _) => planner.database_departed(&mut plan),
        HookEvent::Relation(Relation::Cache, _) => planner.cache_changed(&mut plan),
        HookEvent::Relation(Relation::Cluster, _) => planner.peers_changed(&mut plan),
        HookEvent::Relation(Relation::Website, RelationHook::Joined | RelationHook::Changed) => {
            planner.publish_website(&mut plan);
            Ok(())
        }
        HookEvent::Relation(Relation::Website, _) => Ok(()),
    };

    match result {
        Ok(()) => {
            plan.status = planner.settled_status(&plan);
            plan
        }
        Err(err) => {
            warn!(%event, error = %err, "Planning failed");
            let mut blocked = Plan::new(&snapshot.state);
            blocked.status = UnitStatus::blocked(failure_message(event));
            blocked
        }
    }
}

fn failure_message(event: HookEvent) -> &'static str {
    match event.relation() {
        Some(Relation::Db) => SETUP_FAILED,
        Some(Relation::Cache) => CACHE_FAILED,
        _ => CONFIGURE_FAILED,
    }
}

struct Planner<'a, R: TemplateRenderer> {
    snapshot: &'a Snapshot,
    tokens: &'a Tokens,
    renderer: &'a R,
    settings: &'a Settings,
}

impl<R: TemplateRenderer> Planner<'_, R> {
    fn install(&self, plan: &mut Plan, upgrade: bool) -> Result<(), AppError> {
        plan.push(Action::InstallPackages(PACKAGES.to_vec()), INSTALL_FAILED);
        plan.record(StateChange::PackagesInstalled);
        plan.push(Action::OpenPort(HTTP_PORT), INSTALL_FAILED);
        if upgrade {
            self.reconcile_all(plan)?;
        }
        Ok(())
    }

    /// Site settings always; database and cache settings when their relation exists.
    fn reconcile_all(&self, plan: &mut Plan) -> Result<(), AppError> {
        self.write_site(plan, CONFIGURE_FAILED)?;
        self.converge_database(plan, CONFIGURE_FAILED)?;
        if self.snapshot.has_cache_relation() {
            self.write_cache(plan, CONFIGURE_FAILED)?;
        }
        plan.push(Action::ReloadWebServer, CONFIGURE_FAILED);
        Ok(())
    }

    fn database_changed(&self, plan: &mut Plan) -> Result<(), AppError> {
        if plan.expected.db_status == DbStatus::Disconnected {
            plan.record(StateChange::DbStatus(DbStatus::Joined));
        }
        if self.snapshot.database().is_none() {
            return Ok(());
        }
        self.converge_database(plan, SETUP_FAILED)?;
        plan.push(Action::ReloadWebServer, SETUP_FAILED);
        Ok(())
    }

    fn database_departed(&self, plan: &mut Plan) -> Result<(), AppError> {
        if self.snapshot.database().is_some() {
            // Another database unit still serves complete credentials.
            return self.database_changed(plan);
        }

        plan.record(StateChange::DbStatus(DbStatus::Disconnected));
        if plan.expected.installed || self.snapshot.local_settings_present {
            plan.push(Action::Remove(self.settings.local_settings()), UNINSTALL_FAILED);
        }
        plan.push(
            Action::Remove(self.settings.config_file(TemplateId::Database.file_name())),
            UNINSTALL_FAILED,
        );
        plan.record(StateChange::Installed(false));
        if self.snapshot.is_leader && self.snapshot.schema_ready() {
            self.publish_peer(plan, SCHEMA_READY, "false");
        }
        plan.push(Action::ReloadWebServer, UNINSTALL_FAILED);
        Ok(())
    }

    fn cache_changed(&self, plan: &mut Plan) -> Result<(), AppError> {
        self.write_cache(plan, CACHE_FAILED)?;
        plan.push(Action::ReloadWebServer, CACHE_FAILED);
        Ok(())
    }

    fn peers_changed(&self, plan: &mut Plan) -> Result<(), AppError> {
        self.write_site(plan, CONFIGURE_FAILED)?;
        self.converge_database(plan, CONFIGURE_FAILED)?;
        plan.push(Action::ReloadWebServer, CONFIGURE_FAILED);
        Ok(())
    }

    fn publish_website(&self, plan: &mut Plan) {
        for relation in &self.snapshot.website {
            let data = RelationData::from([
                ("hostname".to_string(), self.snapshot.private_address.clone()),
                ("port".to_string(), HTTP_PORT.to_string()),
            ]);
            plan.push(
                Action::Publish { relation_id: relation.id.clone(), data, app: false },
                PUBLISH_FAILED,
            );
        }
    }

    /// Render `db.php`, run the one-time setup if needed, then provision admins.
    fn converge_database(&self, plan: &mut Plan, on_failure: &str) -> Result<(), AppError> {
        if self.snapshot.has_db_units() && plan.expected.db_status == DbStatus::Disconnected {
            plan.record(StateChange::DbStatus(DbStatus::Joined));
        }
        let Some(database) = self.snapshot.database() else {
            return Ok(());
        };
        let file = self.render(RenderContext::Database(database.clone()))?;
        plan.push(Action::Write(file), on_failure);

        let mut fresh = false;
        if self.snapshot.local_settings_present {
            if !plan.expected.installed {
                plan.push(Action::LinkSettings, SETUP_FAILED);
                plan.record(StateChange::Installed(true));
            }
        } else if self.awaiting_leader() {
            return Ok(());
        } else {
            let site = self.snapshot.site();
            plan.push(
                Action::SetupSchema {
                    database,
                    site_name: site.name,
                    language: site.language,
                    admin_password: self.tokens.bootstrap_password.clone(),
                },
                SETUP_FAILED,
            );
            plan.push(Action::LinkSettings, SETUP_FAILED);
            plan.record(StateChange::Installed(true));
            fresh = true;
        }

        if plan.expected.db_status != DbStatus::Connected {
            plan.record(StateChange::DbStatus(DbStatus::Connected));
        }
        if self.snapshot.is_leader && !self.snapshot.schema_ready() {
            self.publish_peer(plan, SCHEMA_READY, "true");
        }
        self.provision_admins(plan, fresh);
        Ok(())
    }

    /// Admins are reapplied after a fresh install or when the option changed.
    fn provision_admins(&self, plan: &mut Plan, fresh: bool) {
        let admins = &self.snapshot.config.admins;
        let digest = admins_digest(admins);
        if !fresh && plan.expected.admins_digest.as_deref() == Some(digest.as_str()) {
            return;
        }
        for account in parse_admins(admins) {
            plan.push(Action::CreateAdmin(account), ADMIN_FAILED);
        }
        plan.record(StateChange::AdminsApplied(digest));
    }

    /// Only the leader creates the schema; everyone else waits for `schema-ready`.
    fn awaiting_leader(&self) -> bool {
        !self.snapshot.is_leader && !self.snapshot.schema_ready()
    }

    fn write_site(&self, plan: &mut Plan, on_failure: &str) -> Result<(), AppError> {
        let secret_key = self.secret_key(plan);
        let context =
            SiteContext::new(&self.snapshot.site(), &secret_key, &self.settings.debug_log());
        let file = self.render(RenderContext::Site(context))?;
        plan.push(Action::Write(file), on_failure);
        Ok(())
    }

    fn write_cache(&self, plan: &mut Plan, on_failure: &str) -> Result<(), AppError> {
        let context = CacheContext { servers: self.snapshot.cache_servers() };
        let file = self.render(RenderContext::Cache(context))?;
        plan.push(Action::Write(file), on_failure);
        Ok(())
    }

    /// Shared key if a peer published one, else ours, else a fresh one.
    /// The leader publishes whatever key it settles on.
    fn secret_key(&self, plan: &mut Plan) -> String {
        let shared = self.snapshot.shared_secret();
        let key = shared
            .map(str::to_string)
            .or_else(|| plan.expected.secret_key.clone())
            .unwrap_or_else(|| self.tokens.secret_key.clone());

        if plan.expected.secret_key.as_deref() != Some(key.as_str()) {
            plan.record(StateChange::SecretKey(key.clone()));
        }
        if self.snapshot.is_leader && shared != Some(key.as_str()) {
            self.publish_peer(plan, SECRET_KEY, &key);
        }
        key
    }

    fn publish_peer(&self, plan: &mut Plan, key: &str, value: &str) {
        if let Some(peer) = self.snapshot.peer_relation() {
            let data = RelationData::from([(key.to_string(), value.to_string())]);
            plan.push(
                Action::Publish { relation_id: peer.id.clone(), data, app: true },
                PUBLISH_FAILED,
            );
        }
    }

    fn render(&self, context: RenderContext) -> Result<RenderedFile, AppError> {
        let template = context.template();
        let content = self.renderer.render(&context)?;
        let path = self.settings.config_file(template.file_name());
        Ok(RenderedFile { template, path, content })
    }

    /// Status once every step of `plan` has succeeded, driven by the database status.
    fn settled_status(&self, plan: &Plan) -> UnitStatus {
        let state = &plan.expected;
        if !state.packages_installed {
            return UnitStatus::blocked(INSTALL_FAILED);
        }
        match state.db_status {
            DbStatus::Disconnected => UnitStatus::blocked("Waiting for database"),
            _ if self.snapshot.has_partial_database() => {
                UnitStatus::waiting("Waiting for database credentials")
            }
            DbStatus::Connected if state.installed => UnitStatus::active("Ready"),
            _ if self.snapshot.database().is_some() && self.awaiting_leader() => {
                UnitStatus::waiting("Waiting for schema setup on leader")
            }
            _ => UnitStatus::maintenance("Connecting to database"),
        }
    }
}
