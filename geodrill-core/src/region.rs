//! Region catalog: the drilldown hierarchy and its static value table.
//!
//! Regions are identified by [`RegionKey`]. Each key maps to a
//! [`RegionConfig`] holding the title, candidate boundary URLs, the GeoJSON
//! property used to match feature names, and the per-feature values.
//!
//! Click resolution is a pure function of `(region, feature name)`:
//!
//! ```text
//! world   --"India"-->   india
//! india   --"Gujarat"--> gujarat
//! gujarat (leaf)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One level of the drilldown hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKey {
    World,
    India,
    Gujarat,
}

impl RegionKey {
    pub const ALL: [RegionKey; 3] = [RegionKey::World, RegionKey::India, RegionKey::Gujarat];

    /// Canonical key string (used as the map identifier).
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKey::World => "world",
            RegionKey::India => "india",
            RegionKey::Gujarat => "gujarat",
        }
    }

    /// Human-readable label for breadcrumbs.
    pub fn label(self) -> &'static str {
        match self {
            RegionKey::World => "World",
            RegionKey::India => "India",
            RegionKey::Gujarat => "Gujarat",
        }
    }

    /// Resolve a clicked feature to the child region it drills into.
    ///
    /// Feature names are matched exactly, as they appear in the boundary data.
    pub fn resolve_child(self, feature_name: &str) -> Option<RegionKey> {
        match (self, feature_name) {
            (RegionKey::World, "India") => Some(RegionKey::India),
            (RegionKey::India, "Gujarat") => Some(RegionKey::Gujarat),
            _ => None,
        }
    }

    /// True for regions that never drill further.
    pub fn is_leaf(self) -> bool {
        matches!(self, RegionKey::Gujarat)
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown region '{0}' (expected one of: world, india, gujarat)")]
pub struct UnknownRegion(pub String);

impl FromStr for RegionKey {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

/// A named value shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionValue {
    pub name: String,
    pub value: f64,
}

impl RegionValue {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Static configuration for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    pub key: RegionKey,
    pub title: String,
    /// Candidate boundary URLs, tried in order.
    pub sources: Vec<String>,
    /// GeoJSON feature property holding the feature name.
    pub name_property: String,
    pub values: Vec<RegionValue>,
}

impl RegionConfig {
    /// Value for a feature name, if the region has one.
    pub fn value_of(&self, feature_name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.name == feature_name)
            .map(|v| v.value)
    }

    /// Raw numbers, in table order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.value).collect()
    }

    /// Child region a clicked feature leads to.
    pub fn resolve_click(&self, feature_name: &str) -> Option<RegionKey> {
        self.key.resolve_child(feature_name)
    }

    /// Title shown when the boundary data could not be loaded.
    pub fn failed_title(&self) -> String {
        format!("{} (failed to load map)", self.title)
    }
}

fn values(pairs: &[(&str, f64)]) -> Vec<RegionValue> {
    pairs
        .iter()
        .map(|&(name, value)| RegionValue::new(name, value))
        .collect()
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

/// Built-in configuration for a region.
pub fn builtin(key: RegionKey) -> RegionConfig {
    match key {
        RegionKey::World => RegionConfig {
            key,
            title: "World Leads".into(),
            sources: urls(&[
                "https://cdn.jsdelivr.net/npm/echarts/map/json/world.json",
                "https://fastly.jsdelivr.net/npm/echarts/map/json/world.json",
            ]),
            name_property: "name".into(),
            values: values(&[
                ("India", 210.0),
                ("United States of America", 300.0),
                ("Canada", 80.0),
                ("Algeria", 90.0),
            ]),
        },
        RegionKey::India => RegionConfig {
            key,
            title: "India Leads (States/UTs)".into(),
            sources: urls(&[
                "https://gist.githubusercontent.com/jbrobst/56c13bbbf9d97d187fea01ca62ea5112/raw/e388c4cae20aa53cb5090210a42ebb9b765c0a36/india_states.geojson",
            ]),
            name_property: "ST_NM".into(),
            values: values(&[
                ("Gujarat", 50.0),
                ("Ladakh", 2.0),
                ("Maharashtra", 7.0),
                ("Delhi", 10.0),
                ("Karnataka", 22.0),
                ("Tamil Nadu", 35.0),
            ]),
        },
        RegionKey::Gujarat => RegionConfig {
            key,
            title: "Gujarat Leads (Districts)".into(),
            sources: urls(&[
                "https://cdn.jsdelivr.net/gh/udit-001/india-maps-data@bcbcba3/geojson/states/gujarat.geojson",
            ]),
            name_property: "district".into(),
            // "Ahmadabad" is the spelling used by the district boundary file.
            values: values(&[
                ("Ahmadabad", 20.0),
                ("Surat", 8.0),
                ("Vadodara", 3.0),
                ("Rajkot", 7.0),
                ("Bhavnagar", 2.0),
                ("Jamnagar", 6.0),
                ("Dahod", 100.0),
            ]),
        },
    }
}

/// Immutable mapping from region key to its configuration.
#[derive(Debug, Clone)]
pub struct Catalog {
    regions: BTreeMap<RegionKey, RegionConfig>,
    root: RegionKey,
}

impl Catalog {
    /// The full world → india → gujarat hierarchy.
    pub fn builtin() -> Self {
        Self {
            regions: RegionKey::ALL.into_iter().map(|k| (k, builtin(k))).collect(),
            root: RegionKey::World,
        }
    }

    /// Build a catalog from an explicit set of regions.
    ///
    /// Returns `None` when `root` is not among them.
    pub fn from_regions(
        root: RegionKey,
        regions: impl IntoIterator<Item = RegionConfig>,
    ) -> Option<Self> {
        let regions: BTreeMap<_, _> = regions.into_iter().map(|r| (r.key, r)).collect();
        regions.contains_key(&root).then_some(Self { regions, root })
    }

    /// Replace the candidate URLs for the given regions.
    ///
    /// Regions that are not in the catalog are left out.
    pub fn with_sources(mut self, overrides: &BTreeMap<RegionKey, Vec<String>>) -> Self {
        for (key, sources) in overrides {
            if let Some(region) = self.regions.get_mut(key) {
                region.sources = sources.clone();
            }
        }
        self
    }

    pub fn root(&self) -> RegionKey {
        self.root
    }

    pub fn get(&self, key: RegionKey) -> Option<&RegionConfig> {
        self.regions.get(&key)
    }

    pub fn contains(&self, key: RegionKey) -> bool {
        self.regions.contains_key(&key)
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionConfig> {
        self.regions.values()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
