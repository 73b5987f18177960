//! Geometry index configuration.
//!
//! Configuration can be deserialized (serde, camelCase field names) or read
//! from a flat property map using the deployment keys in [`keys`].

use crate::error::{GeoIndexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property keys understood by [`GeoIndexConfig::from_properties`].
pub mod keys {
    /// Comma-separated predicate allow-list (empty admits all predicates)
    pub const GEO_PREDICATES: &str = "sc.geo.predicates";
    /// Backend table name (required)
    pub const GEO_TABLENAME: &str = "sc.geo.table";
    /// Backend partition count
    pub const GEO_NUM_PARTITIONS: &str = "sc.geo.numPartitions";
    /// Facade write buffer capacity (0 = write-through)
    pub const GEO_WRITE_BUFFER_CAPACITY: &str = "sc.geo.writeBufferCapacity";
    pub const INSTANCE: &str = "sc.cloudbase.instancename";
    pub const ZOOKEEPERS: &str = "sc.cloudbase.zookeepers";
    pub const USER: &str = "sc.cloudbase.username";
    pub const PASSWORD: &str = "sc.cloudbase.password";
    /// Comma-separated authorization labels
    pub const AUTHS: &str = "sc.cloudbase.authorizations";
    /// Select the in-memory backend
    pub const USE_MOCK_INSTANCE: &str = ".useMockInstance";
}

/// Default number of backend partitions.
pub const DEFAULT_NUM_PARTITIONS: u32 = 25;

fn default_num_partitions() -> u32 {
    DEFAULT_NUM_PARTITIONS
}

/// Connection settings for a live backend.
///
/// Not consulted when the mock backend is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionConfig {
    pub instance_name: Option<String>,
    pub zookeepers: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Authorization labels applied to reads.
    pub authorizations: Vec<String>,
}

/// Configuration for a geometry index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoIndexConfig {
    /// Predicate IRIs eligible for indexing. Empty admits every predicate.
    #[serde(default)]
    pub predicates: Vec<String>,

    /// Backend table name.
    pub table_name: String,

    /// Number of backend partitions.
    #[serde(default = "default_num_partitions")]
    pub num_partitions: u32,

    /// Live backend connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Use the in-memory backend instead of a live one.
    #[serde(default)]
    pub use_mock: bool,

    /// Number of features the facade buffers before writing.
    /// Default: 0 (every store call writes through)
    #[serde(default)]
    pub write_buffer_capacity: usize,
}

impl GeoIndexConfig {
    /// Create a config for the given table with defaults elsewhere.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            predicates: Vec::new(),
            table_name: table_name.into(),
            num_partitions: DEFAULT_NUM_PARTITIONS,
            connection: ConnectionConfig::default(),
            use_mock: false,
            write_buffer_capacity: 0,
        }
    }

    /// Config for the in-memory backend.
    pub fn mock(table_name: impl Into<String>) -> Self {
        Self::new(table_name).with_mock(true)
    }

    /// Set the predicate allow-list.
    pub fn with_predicates<I, S>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicates = predicates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_num_partitions(mut self, num_partitions: u32) -> Self {
        self.num_partitions = num_partitions;
        self
    }

    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_mock(mut self, use_mock: bool) -> Self {
        self.use_mock = use_mock;
        self
    }

    /// Enable facade-side write buffering (0 disables it).
    pub fn with_write_buffer_capacity(mut self, capacity: usize) -> Self {
        self.write_buffer_capacity = capacity;
        self
    }

    /// Read a config from a flat property map.
    ///
    /// Missing optional keys fall back to their defaults; the result is
    /// validated before it is returned.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            props
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let table_name = get(keys::GEO_TABLENAME)
            .ok_or_else(|| GeoIndexError::config(format!("{} not set", keys::GEO_TABLENAME)))?;

        let num_partitions = match get(keys::GEO_NUM_PARTITIONS) {
            Some(v) => v.parse().map_err(|_| {
                GeoIndexError::config(format!("{} is not a number: {}", keys::GEO_NUM_PARTITIONS, v))
            })?,
            None => DEFAULT_NUM_PARTITIONS,
        };

        let write_buffer_capacity = match get(keys::GEO_WRITE_BUFFER_CAPACITY) {
            Some(v) => v.parse().map_err(|_| {
                GeoIndexError::config(format!(
                    "{} is not a number: {}",
                    keys::GEO_WRITE_BUFFER_CAPACITY,
                    v
                ))
            })?,
            None => 0,
        };

        let use_mock = match get(keys::USE_MOCK_INSTANCE) {
            Some(v) => v.parse().map_err(|_| {
                GeoIndexError::config(format!("{} is not a boolean: {}", keys::USE_MOCK_INSTANCE, v))
            })?,
            None => false,
        };

        let config = Self {
            predicates: split_list(get(keys::GEO_PREDICATES).as_deref()),
            table_name,
            num_partitions,
            connection: ConnectionConfig {
                instance_name: get(keys::INSTANCE),
                zookeepers: get(keys::ZOOKEEPERS),
                username: get(keys::USER),
                password: get(keys::PASSWORD),
                authorizations: split_list(get(keys::AUTHS).as_deref()),
            },
            use_mock,
            write_buffer_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required settings.
    ///
    /// The table name is always required; instance, zookeepers, username and
    /// password are required unless the mock backend is selected.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(GeoIndexError::config("table name must not be empty"));
        }
        if self.num_partitions == 0 {
            return Err(GeoIndexError::config("partition count must be positive"));
        }
        if !self.use_mock {
            let conn = &self.connection;
            for (key, value) in [
                (keys::INSTANCE, &conn.instance_name),
                (keys::ZOOKEEPERS, &conn.zookeepers),
                (keys::USER, &conn.username),
                (keys::PASSWORD, &conn.password),
            ] {
                if value.as_deref().map_or(true, str::is_empty) {
                    return Err(GeoIndexError::config(format!("{} not set", key)));
                }
            }
        }
        Ok(())
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_properties_defaults() {
        let config = GeoIndexConfig::from_properties(&props(&[
            (keys::GEO_TABLENAME, "triplestore_geospatial"),
            (keys::USE_MOCK_INSTANCE, "true"),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "triplestore_geospatial");
        assert_eq!(config.num_partitions, DEFAULT_NUM_PARTITIONS);
        assert!(config.predicates.is_empty());
        assert!(config.use_mock);
        assert_eq!(config.write_buffer_capacity, 0);
    }

    #[test]
    fn test_properties_lists_are_split() {
        let config = GeoIndexConfig::from_properties(&props(&[
            (keys::GEO_TABLENAME, "t"),
            (keys::USE_MOCK_INSTANCE, "true"),
            (keys::GEO_PREDICATES, "urn:p1, urn:p2,,"),
            (keys::AUTHS, "U,FOUO"),
            (keys::GEO_NUM_PARTITIONS, "7"),
        ]))
        .unwrap();

        assert_eq!(config.predicates, vec!["urn:p1", "urn:p2"]);
        assert_eq!(config.connection.authorizations, vec!["U", "FOUO"]);
        assert_eq!(config.num_partitions, 7);
    }

    #[test]
    fn test_table_name_required() {
        let err = GeoIndexConfig::from_properties(&props(&[(keys::USE_MOCK_INSTANCE, "true")]))
            .unwrap_err();
        assert!(matches!(err, GeoIndexError::Config(msg) if msg.contains(keys::GEO_TABLENAME)));
    }

    #[test]
    fn test_live_backend_requires_credentials() {
        let err = GeoIndexConfig::from_properties(&props(&[
            (keys::GEO_TABLENAME, "t"),
            (keys::INSTANCE, "dev"),
            (keys::ZOOKEEPERS, "zk1:2181"),
            (keys::USER, "root"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GeoIndexError::Config(msg) if msg.contains(keys::PASSWORD)));
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = GeoIndexConfig::from_properties(&props(&[
            (keys::GEO_TABLENAME, "t"),
            (keys::USE_MOCK_INSTANCE, "true"),
            (keys::GEO_NUM_PARTITIONS, "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GeoIndexError::Config(_)));
    }

    #[test]
    fn test_deserialize_json() {
        let config: GeoIndexConfig = serde_json::from_value(serde_json::json!({
            "tableName": "geo",
            "predicates": ["http://www.opengis.net/ont/geosparql#asWKT"],
            "useMock": true
        }))
        .unwrap();

        assert_eq!(config.num_partitions, DEFAULT_NUM_PARTITIONS);
        assert_eq!(config.predicates.len(), 1);
        assert!(config.validate().is_ok());
    }
}
