use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    AdminAccount, CharmState, DatabaseConnectionInfo, RelationData, RenderedFile, StateChange,
    UnitStatus,
};

/// A side effect requested by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InstallPackages(Vec<&'static str>),
    OpenPort(u16),
    Write(RenderedFile),
    Remove(PathBuf),
    /// Run the installer that creates the schema and `LocalSettings.php`.
    SetupSchema {
        database: DatabaseConnectionInfo,
        site_name: String,
        language: String,
        admin_password: String,
    },
    /// Make `LocalSettings.php` include the charm-rendered files.
    LinkSettings,
    CreateAdmin(AdminAccount),
    ReloadWebServer,
    Publish { relation_id: String, data: RelationData, app: bool },
    /// Update persisted state; never fails.
    Record(StateChange),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::InstallPackages(packages) => write!(f, "install {}", packages.join(" ")),
            Action::OpenPort(port) => write!(f, "open port {}", port),
            Action::Write(file) => write!(f, "write {}", file.path.display()),
            Action::Remove(path) => write!(f, "remove {}", path.display()),
            Action::SetupSchema { database, .. } => {
                write!(f, "set up schema in {}@{}", database.database, database.host)
            }
            Action::LinkSettings => f.write_str("link LocalSettings.php"),
            Action::CreateAdmin(account) => write!(f, "create admin {}", account.username),
            Action::ReloadWebServer => f.write_str("reload web server"),
            Action::Publish { relation_id, data, app } => {
                let keys: Vec<&str> = data.keys().map(String::as_str).collect();
                let bag = if *app { "app" } else { "unit" };
                write!(f, "publish {} on {} ({} bag)", keys.join(","), relation_id, bag)
            }
            Action::Record(change) => write!(f, "record {:?}", change),
        }
    }
}

/// An action and the status reported if it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub on_failure: UnitStatus,
}

/// Desired outcome of one hook: ordered steps and the status once all succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    /// State expected after every step has succeeded.
    pub expected: CharmState,
    pub status: UnitStatus,
}

impl Plan {
    pub fn new(state: &CharmState) -> Self {
        Self {
            steps: Vec::new(),
            expected: state.clone(),
            status: UnitStatus::maintenance("Reconciling"),
        }
    }

    pub fn push(&mut self, action: Action, on_failure: &str) {
        if let Action::Record(change) = &action {
            self.expected.apply(change);
        }
        self.steps.push(Step { action, on_failure: UnitStatus::blocked(on_failure) });
    }

    pub fn record(&mut self, change: StateChange) {
        self.push(Action::Record(change), "Failed to record state");
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.steps.iter().map(|step| &step.action)
    }

    /// Files this plan writes, in order.
    pub fn files(&self) -> impl Iterator<Item = &RenderedFile> {
        self.actions().filter_map(|action| match action {
            Action::Write(file) => Some(file),
            _ => None,
        })
    }

    pub fn admins(&self) -> impl Iterator<Item = &AdminAccount> {
        self.actions().filter_map(|action| match action {
            Action::CreateAdmin(account) => Some(account),
            _ => None,
        })
    }

    pub fn contains(&self, wanted: &Action) -> bool {
        self.actions().any(|action| action == wanted)
    }
}
