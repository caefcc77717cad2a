use crate::domain::{AppError, CharmState};

/// Port for state persisted between hook invocations.
pub trait StateStore {
    /// Load the stored state, or the default state on first run.
    fn load(&self) -> Result<CharmState, AppError>;

    fn save(&self, state: &CharmState) -> Result<(), AppError>;
}
