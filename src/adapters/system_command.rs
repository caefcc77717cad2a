use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::domain::AppError;
use crate::ports::System;

/// [`System`] implementation running host binaries (`apt-get`, `php`, `service`).
#[derive(Debug, Clone, Default)]
pub struct SystemCommandAdapter;

impl SystemCommandAdapter {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, mut command: Command, command_line: String) -> Result<(), AppError> {
        info!(command = %command_line, "Running");
        let output = command.output().map_err(|e| AppError::Command {
            command: command_line.clone(),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Command {
                command: command_line,
                details: if stderr.is_empty() { output.status.to_string() } else { stderr },
            });
        }
        Ok(())
    }
}

impl System for SystemCommandAdapter {
    fn install_packages(&self, packages: &[&str]) -> Result<(), AppError> {
        let mut command = Command::new("apt-get");
        command.env("DEBIAN_FRONTEND", "noninteractive").args(["install", "-y"]).args(packages);
        self.run(command, format!("apt-get install -y {}", packages.join(" ")))
    }

    fn run_maintenance(&self, script: &Path, args: &[String]) -> Result<(), AppError> {
        let mut command = Command::new("php");
        command.arg(script).args(args);
        // Arguments carry passwords; only the script name is logged.
        self.run(command, format!("php {}", script.display()))
    }

    fn reload_service(&self, service: &str) -> Result<(), AppError> {
        let mut command = Command::new("service");
        command.args([service, "reload"]);
        self.run(command, format!("service {} reload", service))
    }
}
