use std::path::Path;

use crate::domain::AppError;

/// Port for side-effecting host commands.
pub trait System {
    /// Install distribution packages.
    fn install_packages(&self, packages: &[&str]) -> Result<(), AppError>;

    /// Run a MediaWiki maintenance script with the PHP CLI.
    fn run_maintenance(&self, script: &Path, args: &[String]) -> Result<(), AppError>;

    /// Ask a system service to reload its configuration.
    fn reload_service(&self, service: &str) -> Result<(), AppError>;
}
