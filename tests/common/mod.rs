//! Shared testing utilities for mediawiki-charm CLI tests.
//!
//! Hook tools and host commands are replaced by shell stubs on `PATH`. The
//! stubs answer queries from files under the world directory and append every
//! call to `calls.log`.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const QUERY_TOOLS: &[(&str, &str)] = &[
    ("config-get", r#"cat "$WORLD/config.json" 2>/dev/null || echo '{}'"#),
    ("is-leader", r#"cat "$WORLD/leader" 2>/dev/null || echo true"#),
    ("unit-get", r#"echo '"10.0.0.1"'"#),
    ("relation-ids", r#"cat "$WORLD/relations/$2.json" 2>/dev/null || echo '[]'"#),
    ("relation-list", r#"cat "$WORLD/units/$3.json" 2>/dev/null || echo '[]'"#),
    (
        "relation-get",
        r#"if [ "$2" = "--app" ]; then
    cat "$WORLD/app/$4.json" 2>/dev/null || echo '{}'
else
    cat "$WORLD/bags/$3/$5.json" 2>/dev/null || echo '{}'
fi"#,
    ),
];

const RECORDING_TOOLS: &[&str] =
    &["relation-set", "status-set", "open-port", "juju-log", "apt-get", "service"];

const PHP: &str = r#"case "$1" in
*install.php)
    prev=""
    for arg in "$@"; do
        if [ "$prev" = "--confpath" ]; then
            printf '<?php\n# Generated by install.php\n' > "$arg/LocalSettings.php"
        fi
        prev="$arg"
    done
    ;;
esac"#;

/// Isolated charm directory, settings directory and stubbed hook environment.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    bin_dir: PathBuf,
    world: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let bin_dir = root.path().join("bin");
        let world = root.path().join("world");
        for dir in [&bin_dir, &world, &root.path().join("etc"), &root.path().join("charm")] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        let ctx = Self { root, bin_dir, world };
        for (tool, body) in QUERY_TOOLS {
            ctx.write_stub(tool, body);
        }
        for tool in RECORDING_TOOLS {
            ctx.write_stub(tool, "");
        }
        ctx.write_stub("php", PHP);
        ctx
    }

    fn write_stub(&self, name: &str, body: &str) {
        let script = format!(
            r#"#!/bin/sh
WORLD="{world}"
echo "{name} $*" >> "$WORLD/calls.log"
if [ -e "$WORLD/fail/{name}" ]; then
    echo "{name}: simulated failure" >&2
    exit 1
fi
{body}
"#,
            world = self.world.display(),
        );
        let path = self.bin_dir.join(name);
        fs::write(&path, script).expect("Failed to write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make stub executable");
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("etc")
    }

    pub fn charm_dir(&self) -> PathBuf {
        self.root.path().join("charm")
    }

    /// Build a command for the compiled binary with the stubbed environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("mediawiki-charm").expect("Failed to locate binary");
        let path = format!("{}:{}", self.bin_dir.display(), env::var("PATH").unwrap_or_default());
        cmd.current_dir(self.charm_dir())
            .env("PATH", path)
            .env("JUJU_UNIT_NAME", "mediawiki/0")
            .env("JUJU_CHARM_DIR", self.charm_dir())
            .env("MEDIAWIKI_CONFIG_DIR", self.config_dir())
            .env("MEDIAWIKI_MAINTENANCE_DIR", self.root.path().join("maintenance"))
            .env_remove("JUJU_DISPATCH_PATH");
        cmd
    }

    /// Run a hook by name and require a zero exit.
    pub fn hook(&self, name: &str) {
        self.cli().args(["hook", name]).assert().success();
    }

    pub fn set_config(&self, json: &str) {
        self.write_world("config.json", json);
    }

    pub fn set_leader(&self, leader: bool) {
        self.write_world("leader", if leader { "true" } else { "false" });
    }

    /// Relate a remote unit publishing `bag` (a JSON object).
    pub fn relate(&self, relation: &str, id: &str, unit: &str, bag: &str) {
        self.write_world(&format!("relations/{relation}.json"), &format!(r#"["{id}"]"#));
        self.write_world(&format!("units/{id}.json"), &format!(r#"["{unit}"]"#));
        self.write_world(&format!("bags/{id}/{unit}.json"), bag);
    }

    /// Publish `bag` (a JSON object) as this application's side of relation `id`.
    pub fn set_app_data(&self, id: &str, bag: &str) {
        self.write_world(&format!("app/{id}.json"), bag);
    }

    /// Make the named stub exit non-zero.
    pub fn fail(&self, tool: &str) {
        self.write_world(&format!("fail/{tool}"), "");
    }

    fn write_world(&self, relative: &str, content: &str) {
        let path = self.world.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create world directory");
        }
        fs::write(path, content).expect("Failed to write world file");
    }

    /// Every stub invocation so far, one per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.world.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.calls().into_iter().rev().find(|call| call.starts_with("status-set "))
    }

    pub fn read_config(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.config_dir().join(name)).ok()
    }

    pub fn state_file(&self) -> PathBuf {
        self.charm_dir().join(".mediawiki-charm/state.json")
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}
