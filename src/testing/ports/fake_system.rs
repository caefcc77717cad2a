use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{ConfigStore, System};

use super::MemoryConfigStore;

/// Records host commands instead of running them.
#[derive(Default)]
pub struct FakeSystem {
    installed: Mutex<Vec<String>>,
    maintenance: Mutex<Vec<(PathBuf, Vec<String>)>>,
    reloads: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
    local_settings_target: Mutex<Option<MemoryConfigStore>>,
}

#[allow(dead_code)]
impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail commands named `apt-get`, `service`, or a maintenance script file name.
    pub fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().push(name.to_string());
    }

    /// Have `install.php` create `LocalSettings.php` in `store`, as the real installer does.
    pub fn creates_local_settings(&self, store: MemoryConfigStore) {
        *self.local_settings_target.lock().unwrap() = Some(store);
    }

    pub fn installed_packages(&self) -> Vec<String> {
        self.installed.lock().unwrap().clone()
    }

    pub fn maintenance_runs(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.maintenance.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> Vec<String> {
        self.reloads.lock().unwrap().clone()
    }

    fn check(&self, name: &str) -> Result<(), AppError> {
        if self.failing.lock().unwrap().iter().any(|n| n == name) {
            return Err(AppError::Command {
                command: name.to_string(),
                details: "Mock command failure".to_string(),
            });
        }
        Ok(())
    }
}

impl System for FakeSystem {
    fn install_packages(&self, packages: &[&str]) -> Result<(), AppError> {
        self.check("apt-get")?;
        self.installed.lock().unwrap().extend(packages.iter().map(|p| p.to_string()));
        Ok(())
    }

    fn run_maintenance(&self, script: &Path, args: &[String]) -> Result<(), AppError> {
        let name = script.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        self.check(&name)?;
        self.maintenance.lock().unwrap().push((script.to_path_buf(), args.to_vec()));

        if name != "install.php" {
            return Ok(());
        }
        let target = self.local_settings_target.lock().unwrap();
        let confpath = args.iter().position(|arg| arg == "--confpath").map(|i| &args[i + 1]);
        if let (Some(store), Some(dir)) = (target.as_ref(), confpath) {
            let path = Path::new(dir).join("LocalSettings.php");
            store.write_atomic(&path, "<?php\n# Generated by install.php\n")?;
        }
        Ok(())
    }

    fn reload_service(&self, service: &str) -> Result<(), AppError> {
        self.check("service")?;
        self.reloads.lock().unwrap().push(service.to_string());
        Ok(())
    }
}
