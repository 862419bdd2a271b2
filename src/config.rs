use std::{collections::BTreeSet, fs, path::Path};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_ROUTE_TYPES: [&str; 2] = ["0", "1"];
pub const DEFAULT_ZONE_IDS: [&str; 5] = ["0", "P", "B", "0,B", "P,0"];

/// Which part of the feed ends up in the graph.
///
/// `route_types` are GTFS `route_type` codes (`0` tram, `1` metro) and
/// `zone_ids` are exact `zone_id` values a stop must carry.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub route_types: BTreeSet<String>,
    pub zone_ids: BTreeSet<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            route_types: DEFAULT_ROUTE_TYPES.iter().map(|s| s.to_string()).collect(),
            zone_ids: DEFAULT_ZONE_IDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn selects_route_type(&self, route_type: &str) -> bool {
        self.route_types.contains(route_type)
    }

    pub fn selects_zone(&self, zone_id: &str) -> bool {
        self.zone_ids.contains(zone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_selects_tram_and_metro() {
        let config = GraphConfig::default();
        assert_eq!(set(&["0", "1"]), config.route_types);
        assert_eq!(set(&["0", "0,B", "B", "P", "P,0"]), config.zone_ids);
        assert!(config.selects_route_type("1"));
        assert!(!config.selects_route_type("3"));
        assert!(config.selects_zone("P,0"));
        assert!(!config.selects_zone("1"));
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = GraphConfig::from_toml_str(r#"route_types = ["3"]"#).unwrap();
        assert_eq!(set(&["3"]), config.route_types);
        assert_eq!(GraphConfig::default().zone_ids, config.zone_ids);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(GraphConfig::default(), GraphConfig::from_toml_str("").unwrap());
    }

    #[test]
    fn malformed_document_is_rejected() {
        let error = GraphConfig::from_toml_str("route_types = 0").unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        assert!(GraphConfig::from_toml_str("zones = []").is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.toml");
        fs::write(&path, "zone_ids = [\"1\", \"2\"]\n").unwrap();

        let config = GraphConfig::from_file(&path).unwrap();
        assert_eq!(set(&["1", "2"]), config.zone_ids);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = GraphConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}
