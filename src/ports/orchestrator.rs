use crate::domain::{AppError, CharmConfig, RelationData, UnitStatus};

/// Port onto the orchestrator's hook tools.
pub trait Orchestrator {
    /// Relation ids currently established for a relation name, e.g. `["db:3"]`.
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>, AppError>;

    /// Remote units participating in a relation.
    fn relation_units(&self, relation_id: &str) -> Result<Vec<String>, AppError>;

    /// Bag published by a remote unit.
    fn relation_get(&self, relation_id: &str, unit: &str) -> Result<RelationData, AppError>;

    /// Bag published by this application (readable by every unit of it).
    fn relation_get_app(&self, relation_id: &str) -> Result<RelationData, AppError>;

    /// Publish values on this unit's bag, or on the application bag when `app` is set.
    fn relation_set(
        &self,
        relation_id: &str,
        data: &RelationData,
        app: bool,
    ) -> Result<(), AppError>;

    /// Current charm configuration.
    fn config(&self) -> Result<CharmConfig, AppError>;

    /// This unit's address on the private network.
    fn private_address(&self) -> Result<String, AppError>;

    /// Whether this unit currently holds application leadership.
    fn is_leader(&self) -> Result<bool, AppError>;

    /// Report workload status.
    fn set_status(&self, status: &UnitStatus) -> Result<(), AppError>;

    /// Expose a TCP port on the unit.
    fn open_port(&self, port: u16) -> Result<(), AppError>;

    /// Send a message to the unit log.
    fn log(&self, message: &str) -> Result<(), AppError>;
}
