use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::AppError;

/// Relations declared in the charm metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// MySQL-compatible database (required).
    Db,
    /// memcached servers (optional).
    Cache,
    /// Peer relation between replicas of this application.
    Cluster,
    /// HTTP reverse proxy / load balancer (provided).
    Website,
}

impl Relation {
    pub const ALL: [Relation; 4] =
        [Relation::Db, Relation::Cache, Relation::Cluster, Relation::Website];

    pub fn name(self) -> &'static str {
        match self {
            Relation::Db => "db",
            Relation::Cache => "cache",
            Relation::Cluster => "cluster",
            Relation::Website => "website",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationHook {
    Joined,
    Changed,
    Departed,
    Broken,
}

impl RelationHook {
    fn suffix(self) -> &'static str {
        match self {
            RelationHook::Joined => "joined",
            RelationHook::Changed => "changed",
            RelationHook::Departed => "departed",
            RelationHook::Broken => "broken",
        }
    }
}

/// A lifecycle event delivered by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    Install,
    UpgradeCharm,
    Start,
    ConfigChanged,
    LeaderElected,
    Relation(Relation, RelationHook),
}

impl HookEvent {
    /// Resolve an event from a dispatch path such as `hooks/db-relation-changed`.
    pub fn from_dispatch_path(path: &str) -> Result<Self, AppError> {
        let name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::UnknownHook(path.to_string()))?;
        name.parse()
    }

    pub fn relation(&self) -> Option<Relation> {
        match self {
            HookEvent::Relation(relation, _) => Some(*relation),
            _ => None,
        }
    }
}

impl FromStr for HookEvent {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let event = match name {
            "install" => HookEvent::Install,
            "upgrade-charm" => HookEvent::UpgradeCharm,
            "start" => HookEvent::Start,
            "config-changed" => HookEvent::ConfigChanged,
            "leader-elected" => HookEvent::LeaderElected,
            other => {
                let (relation, hook) = other
                    .split_once("-relation-")
                    .ok_or_else(|| AppError::UnknownHook(other.to_string()))?;
                let relation = Relation::ALL
                    .into_iter()
                    .find(|candidate| candidate.name() == relation)
                    .ok_or_else(|| AppError::UnknownHook(other.to_string()))?;
                let hook = match hook {
                    "joined" => RelationHook::Joined,
                    "changed" => RelationHook::Changed,
                    "departed" => RelationHook::Departed,
                    "broken" => RelationHook::Broken,
                    _ => return Err(AppError::UnknownHook(other.to_string())),
                };
                HookEvent::Relation(relation, hook)
            }
        };
        Ok(event)
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookEvent::Install => f.write_str("install"),
            HookEvent::UpgradeCharm => f.write_str("upgrade-charm"),
            HookEvent::Start => f.write_str("start"),
            HookEvent::ConfigChanged => f.write_str("config-changed"),
            HookEvent::LeaderElected => f.write_str("leader-elected"),
            HookEvent::Relation(relation, hook) => {
                write!(f, "{}-relation-{}", relation, hook.suffix())
            }
        }
    }
}
