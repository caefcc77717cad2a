//! Relation-data collector.
//!
//! Reads everything a reconciliation needs from the orchestrator into a
//! [`Snapshot`] so the planner never touches a hook tool itself.

use tracing::debug;

use crate::domain::{
    AppError, CacheServer, CharmConfig, CharmState, DatabaseConnectionInfo, Relation, RelationData,
    SiteOptions,
};
use crate::ports::{ConfigStore, Orchestrator, StateStore, System};

use super::AppContext;

pub const SECRET_KEY: &str = "secret-key";
pub const SCHEMA_READY: &str = "schema-ready";

/// A remote unit and the bag it has published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteUnit {
    pub name: String,
    pub data: RelationData,
}

/// One established relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSnapshot {
    pub id: String,
    /// Remote units, sorted by name.
    pub units: Vec<RemoteUnit>,
    /// This application's bag; only read for the peer relation.
    pub app_data: RelationData,
}

/// External state observed at the start of a hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub config: CharmConfig,
    pub state: CharmState,
    pub is_leader: bool,
    pub private_address: String,
    pub local_settings_present: bool,
    pub db: Vec<RelationSnapshot>,
    pub cache: Vec<RelationSnapshot>,
    pub peers: Vec<RelationSnapshot>,
    pub website: Vec<RelationSnapshot>,
}

impl Snapshot {
    pub fn site(&self) -> SiteOptions {
        SiteOptions::from_config(&self.config)
    }

    pub fn has_db_units(&self) -> bool {
        self.db.iter().any(|relation| !relation.units.is_empty())
    }

    /// Some database unit published part of its credentials, but none all of them.
    pub fn has_partial_database(&self) -> bool {
        self.database().is_none()
            && self
                .db
                .iter()
                .flat_map(|relation| relation.units.iter())
                .any(|unit| DatabaseConnectionInfo::has_any_credential(&unit.data))
    }

    /// The first remote database unit that has published complete credentials.
    pub fn database(&self) -> Option<DatabaseConnectionInfo> {
        self.db
            .iter()
            .flat_map(|relation| relation.units.iter())
            .find_map(|unit| DatabaseConnectionInfo::from_bag(&unit.data))
    }

    pub fn has_cache_relation(&self) -> bool {
        !self.cache.is_empty()
    }

    /// Cache servers from every related cache unit, in unit order.
    pub fn cache_servers(&self) -> Vec<CacheServer> {
        self.cache
            .iter()
            .flat_map(|relation| relation.units.iter())
            .filter_map(|unit| CacheServer::from_bag(&unit.data))
            .collect()
    }

    pub fn peer_relation(&self) -> Option<&RelationSnapshot> {
        self.peers.first()
    }

    /// Secret key published for the whole application, if any.
    pub fn shared_secret(&self) -> Option<&str> {
        self.peer_relation()
            .and_then(|peer| peer.app_data.get(SECRET_KEY))
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    /// Whether the leader reported that the database schema exists.
    pub fn schema_ready(&self) -> bool {
        self.peer_relation()
            .and_then(|peer| peer.app_data.get(SCHEMA_READY))
            .is_some_and(|value| value == "true")
    }
}

/// Gather a [`Snapshot`]. Reads only; nothing is published or written.
pub fn collect<O, S, C, T>(ctx: &AppContext<O, S, C, T>) -> Result<Snapshot, AppError>
where
    O: Orchestrator,
    S: System,
    C: ConfigStore,
    T: StateStore,
{
    let orchestrator = ctx.orchestrator();

    let snapshot = Snapshot {
        config: orchestrator.config()?,
        state: ctx.state().load()?,
        is_leader: orchestrator.is_leader()?,
        private_address: orchestrator.private_address()?,
        local_settings_present: ctx.files().exists(&ctx.settings().local_settings()),
        db: collect_relation(orchestrator, Relation::Db)?,
        cache: collect_relation(orchestrator, Relation::Cache)?,
        peers: collect_relation(orchestrator, Relation::Cluster)?,
        website: collect_relation(orchestrator, Relation::Website)?,
    };

    debug!(
        db_relations = snapshot.db.len(),
        cache_servers = snapshot.cache_servers().len(),
        peers = snapshot.peers.iter().map(|p| p.units.len()).sum::<usize>(),
        leader = snapshot.is_leader,
        "Collected snapshot"
    );
    Ok(snapshot)
}

fn collect_relation(
    orchestrator: &impl Orchestrator,
    relation: Relation,
) -> Result<Vec<RelationSnapshot>, AppError> {
    let mut relations = Vec::new();
    for id in orchestrator.relation_ids(relation.name())? {
        let mut units = Vec::new();
        // Our own side of the website relation is all we publish; remote bags are unused.
        if relation != Relation::Website {
            for name in orchestrator.relation_units(&id)? {
                let data = orchestrator.relation_get(&id, &name)?;
                units.push(RemoteUnit { name, data });
            }
            units.sort_by(|a, b| unit_order(&a.name).cmp(&unit_order(&b.name)));
        }
        let app_data = if relation == Relation::Cluster {
            orchestrator.relation_get_app(&id)?
        } else {
            RelationData::new()
        };
        relations.push(RelationSnapshot { id, units, app_data });
    }
    Ok(relations)
}

/// Sort key putting `memcached/2` before `memcached/10`.
fn unit_order(name: &str) -> (&str, u64) {
    match name.rsplit_once('/') {
        Some((app, number)) => (app, number.parse().unwrap_or(u64::MAX)),
        None => (name, 0),
    }
}
