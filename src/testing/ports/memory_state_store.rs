use std::sync::Mutex;

use crate::domain::{AppError, CharmState};
use crate::ports::StateStore;

/// State store keeping the last saved state in memory.
#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<Option<CharmState>>,
}

#[allow(dead_code)]
impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: CharmState) -> Self {
        Self { state: Mutex::new(Some(state)) }
    }

    pub fn saved(&self) -> Option<CharmState> {
        self.state.lock().unwrap().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<CharmState, AppError> {
        Ok(self.state.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, state: &CharmState) -> Result<(), AppError> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}
