use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::{AppError, CharmConfig, RelationData, UnitStatus};
use crate::ports::Orchestrator;

#[derive(Debug, Default)]
struct FakeRelation {
    name: String,
    units: BTreeMap<String, RelationData>,
    app: RelationData,
}

/// In-memory orchestrator recording everything the charm reports.
pub struct FakeOrchestrator {
    relations: Mutex<BTreeMap<String, FakeRelation>>,
    config: Mutex<CharmConfig>,
    /// Starts as leader, like the only unit of an application.
    leader: Mutex<bool>,
    address: Mutex<String>,
    statuses: Mutex<Vec<UnitStatus>>,
    published: Mutex<Vec<(String, RelationData, bool)>>,
    ports: Mutex<Vec<u16>>,
    logs: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
}

impl Default for FakeOrchestrator {
    fn default() -> Self {
        Self {
            relations: Mutex::new(BTreeMap::new()),
            config: Mutex::new(CharmConfig::default()),
            leader: Mutex::new(true),
            address: Mutex::new("10.0.0.1".to_string()),
            statuses: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
            ports: Mutex::new(Vec::new()),
            logs: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakeOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_relation(&self, id: &str, name: &str) {
        self.relations
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_insert_with(|| FakeRelation { name: name.to_string(), ..FakeRelation::default() });
    }

    /// Add or replace a remote unit's bag.
    pub fn add_unit(&self, id: &str, name: &str, unit: &str, pairs: &[(&str, &str)]) {
        self.add_relation(id, name);
        let data = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let mut relations = self.relations.lock().unwrap();
        if let Some(relation) = relations.get_mut(id) {
            relation.units.insert(unit.to_string(), data);
        }
    }

    pub fn remove_unit(&self, id: &str, unit: &str) {
        if let Some(relation) = self.relations.lock().unwrap().get_mut(id) {
            relation.units.remove(unit);
        }
    }

    pub fn set_app_data(&self, id: &str, pairs: &[(&str, &str)]) {
        if let Some(relation) = self.relations.lock().unwrap().get_mut(id) {
            relation.app = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        }
    }

    pub fn app_data(&self, id: &str) -> RelationData {
        self.relations.lock().unwrap().get(id).map(|r| r.app.clone()).unwrap_or_default()
    }

    pub fn set_config(&self, json: &str) {
        *self.config.lock().unwrap() = serde_json::from_str(json).unwrap();
    }

    pub fn set_leader(&self, leader: bool) {
        *self.leader.lock().unwrap() = leader;
    }

    /// Make the named hook tool fail from now on.
    pub fn fail_tool(&self, tool: &str) {
        self.failing.lock().unwrap().push(tool.to_string());
    }

    pub fn statuses(&self) -> Vec<UnitStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<(String, RelationData, bool)> {
        self.published.lock().unwrap().clone()
    }

    pub fn opened_ports(&self) -> Vec<u16> {
        self.ports.lock().unwrap().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }

    fn check(&self, tool: &str) -> Result<(), AppError> {
        if self.failing.lock().unwrap().iter().any(|t| t == tool) {
            return Err(AppError::HookTool {
                command: tool.to_string(),
                details: "Mock hook tool failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Orchestrator for FakeOrchestrator {
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>, AppError> {
        self.check("relation-ids")?;
        let relations = self.relations.lock().unwrap();
        Ok(relations.iter().filter(|(_, r)| r.name == relation).map(|(id, _)| id.clone()).collect())
    }

    fn relation_units(&self, relation_id: &str) -> Result<Vec<String>, AppError> {
        self.check("relation-list")?;
        let relations = self.relations.lock().unwrap();
        Ok(relations
            .get(relation_id)
            .map(|relation| relation.units.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn relation_get(&self, relation_id: &str, unit: &str) -> Result<RelationData, AppError> {
        self.check("relation-get")?;
        let relations = self.relations.lock().unwrap();
        Ok(relations
            .get(relation_id)
            .and_then(|r| r.units.get(unit).cloned())
            .unwrap_or_default())
    }

    fn relation_get_app(&self, relation_id: &str) -> Result<RelationData, AppError> {
        self.check("relation-get")?;
        Ok(self.app_data(relation_id))
    }

    fn relation_set(
        &self,
        relation_id: &str,
        data: &RelationData,
        app: bool,
    ) -> Result<(), AppError> {
        self.check("relation-set")?;
        if app {
            if let Some(relation) = self.relations.lock().unwrap().get_mut(relation_id) {
                relation.app.extend(data.clone());
            }
        }
        self.published.lock().unwrap().push((relation_id.to_string(), data.clone(), app));
        Ok(())
    }

    fn config(&self) -> Result<CharmConfig, AppError> {
        self.check("config-get")?;
        Ok(self.config.lock().unwrap().clone())
    }

    fn private_address(&self) -> Result<String, AppError> {
        self.check("unit-get")?;
        Ok(self.address.lock().unwrap().clone())
    }

    fn is_leader(&self) -> Result<bool, AppError> {
        self.check("is-leader")?;
        Ok(*self.leader.lock().unwrap())
    }

    fn set_status(&self, status: &UnitStatus) -> Result<(), AppError> {
        self.check("status-set")?;
        self.statuses.lock().unwrap().push(status.clone());
        Ok(())
    }

    fn open_port(&self, port: u16) -> Result<(), AppError> {
        self.check("open-port")?;
        self.ports.lock().unwrap().push(port);
        Ok(())
    }

    fn log(&self, message: &str) -> Result<(), AppError> {
        self.logs.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
