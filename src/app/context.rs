use crate::domain::Settings;
use crate::ports::{ConfigStore, Orchestrator, StateStore, System};

/// Application context holding dependencies for hook execution.
pub struct AppContext<O: Orchestrator, S: System, C: ConfigStore, T: StateStore> {
    orchestrator: O,
    system: S,
    files: C,
    state: T,
    settings: Settings,
}

impl<O: Orchestrator, S: System, C: ConfigStore, T: StateStore> AppContext<O, S, C, T> {
    /// Create a new application context.
    pub fn new(orchestrator: O, system: S, files: C, state: T, settings: Settings) -> Self {
        Self { orchestrator, system, files, state, settings }
    }

    /// Get a reference to the orchestrator hook tools.
    pub fn orchestrator(&self) -> &O {
        &self.orchestrator
    }

    /// Get a reference to the host command runner.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Get a reference to the settings file store.
    pub fn files(&self) -> &C {
        &self.files
    }

    /// Get a reference to the persisted state store.
    pub fn state(&self) -> &T {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
