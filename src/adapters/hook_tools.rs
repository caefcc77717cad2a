use std::env;
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{AppError, CharmConfig, RelationData, UnitStatus};
use crate::ports::Orchestrator;

/// [`Orchestrator`] backed by the hook tools the agent puts on `PATH`.
#[derive(Debug, Clone)]
pub struct HookToolsAdapter {
    unit_name: String,
}

impl HookToolsAdapter {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self { unit_name: unit_name.into() }
    }

    /// Build from `JUJU_UNIT_NAME`, which the agent sets for every hook.
    pub fn from_env() -> Result<Self, AppError> {
        let unit_name = env::var("JUJU_UNIT_NAME")
            .map_err(|_| AppError::MissingEnv("JUJU_UNIT_NAME".into()))?;
        Ok(Self::new(unit_name))
    }

    fn app_name(&self) -> &str {
        self.unit_name.split('/').next().unwrap_or(&self.unit_name)
    }

    fn run(&self, tool: &str, args: &[&str]) -> Result<String, AppError> {
        debug!(tool, ?args, "Running hook tool");
        let output = Command::new(tool).args(args).output().map_err(|e| AppError::HookTool {
            command: format!("{} {}", tool, args.join(" ")),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::HookTool {
                command: format!("{} {}", tool, args.join(" ")),
                details: if stderr.is_empty() { output.status.to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run_json<T: DeserializeOwned>(&self, tool: &str, args: &[&str]) -> Result<T, AppError> {
        let mut full_args = vec!["--format=json"];
        full_args.extend_from_slice(args);
        let output = self.run(tool, &full_args)?;
        serde_json::from_str(if output.is_empty() { "null" } else { &output }).map_err(|e| {
            AppError::ParseError {
                what: format!("{} output", tool),
                details: format!("Value: '{}', Error: {}", output, e),
            }
        })
    }
}

impl Orchestrator for HookToolsAdapter {
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>, AppError> {
        let ids: Option<Vec<String>> = self.run_json("relation-ids", &[relation])?;
        Ok(ids.unwrap_or_default())
    }

    fn relation_units(&self, relation_id: &str) -> Result<Vec<String>, AppError> {
        let units: Option<Vec<String>> = self.run_json("relation-list", &["-r", relation_id])?;
        let mut units = units.unwrap_or_default();
        units.sort();
        Ok(units)
    }

    fn relation_get(&self, relation_id: &str, unit: &str) -> Result<RelationData, AppError> {
        let bag: Option<RelationData> =
            self.run_json("relation-get", &["-r", relation_id, "-", unit])?;
        Ok(bag.unwrap_or_default())
    }

    fn relation_get_app(&self, relation_id: &str) -> Result<RelationData, AppError> {
        let app = self.app_name().to_string();
        let bag: Option<RelationData> =
            self.run_json("relation-get", &["--app", "-r", relation_id, "-", &app])?;
        Ok(bag.unwrap_or_default())
    }

    fn relation_set(
        &self,
        relation_id: &str,
        data: &RelationData,
        app: bool,
    ) -> Result<(), AppError> {
        let pairs: Vec<String> = data.iter().map(|(key, value)| format!("{key}={value}")).collect();
        let mut args = Vec::with_capacity(pairs.len() + 3);
        if app {
            args.push("--app");
        }
        args.extend(["-r", relation_id]);
        args.extend(pairs.iter().map(String::as_str));
        self.run("relation-set", &args).map(|_| ())
    }

    fn config(&self) -> Result<CharmConfig, AppError> {
        let config: Option<CharmConfig> = self.run_json("config-get", &[])?;
        Ok(config.unwrap_or_default())
    }

    fn private_address(&self) -> Result<String, AppError> {
        self.run_json("unit-get", &["private-address"])
    }

    fn is_leader(&self) -> Result<bool, AppError> {
        self.run_json("is-leader", &[])
    }

    fn set_status(&self, status: &UnitStatus) -> Result<(), AppError> {
        self.run("status-set", &[status.workload(), status.message()]).map(|_| ())
    }

    fn open_port(&self, port: u16) -> Result<(), AppError> {
        self.run("open-port", &[&format!("{}/tcp", port)]).map(|_| ())
    }

    fn log(&self, message: &str) -> Result<(), AppError> {
        self.run("juju-log", &["-l", "INFO", message]).map(|_| ())
    }
}
