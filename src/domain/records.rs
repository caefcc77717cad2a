use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value bag published by one side of a relation.
pub type RelationData = BTreeMap<String, String>;

/// Published by the remote database unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConnectionInfo {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConnectionInfo {
    /// Build connection info from a relation bag.
    ///
    /// Returns `None` until the remote side has published all four values;
    /// a partial bag means "not ready yet", not an error.
    pub fn from_bag(bag: &RelationData) -> Option<Self> {
        Some(Self {
            host: address_of(bag)?,
            database: value_of(bag, "database")?,
            user: value_of(bag, "user")?,
            password: value_of(bag, "password")?,
        })
    }

    /// Whether the remote side has started publishing credentials.
    pub fn has_any_credential(bag: &RelationData) -> bool {
        ["database", "user", "password"].iter().any(|key| value_of(bag, key).is_some())
    }
}

/// One memcached endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheServer {
    pub address: String,
    pub port: u16,
}

impl CacheServer {
    pub fn from_bag(bag: &RelationData) -> Option<Self> {
        let address = address_of(bag)?;
        let port = value_of(bag, "port")?.parse().ok()?;
        Some(Self { address, port })
    }
}

fn value_of(bag: &RelationData, key: &str) -> Option<String> {
    bag.get(key).map(|value| value.trim()).filter(|value| !value.is_empty()).map(str::to_string)
}

fn address_of(bag: &RelationData) -> Option<String> {
    value_of(bag, "host").or_else(|| value_of(bag, "private-address"))
}
