//! Render pass configuration.
//!
//! Every field has a default, so a configuration file only needs the keys it
//! changes:
//!
//! ```yaml
//! item_hsep: 4
//! itemize_levels: 2
//! depth_policy: clamp
//! numbering: scoped
//! ```
//!
//! Configuration is read before a render pass starts. Changing it later never
//! rewrites counters that have already advanced.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::Spacing;
use crate::error::ConfigError;
use crate::nesting::{Construct, DepthPolicy};

/// How counters behave across separate lists of the same kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// Counters advance once per item and keep running across lists of the
    /// same kind. Hosts restart a list through the counter store.
    #[default]
    Continuous,
    /// Each list numbers from 1; the counter is restored when the list closes.
    Scoped,
}

/// Tunable spacing, nesting and numbering settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Columns reserved for markers.
    pub item_hsep: usize,
    /// Blank lines around lists and between items.
    pub item_vsep: usize,
    pub itemize_levels: usize,
    pub enumerate_levels: usize,
    pub depth_policy: DepthPolicy,
    pub numbering: Numbering,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_hsep: 3,
            item_vsep: 0,
            itemize_levels: Construct::Itemize.default_cycle_length(),
            enumerate_levels: Construct::Enumerate.default_cycle_length(),
            depth_policy: DepthPolicy::Wrap,
            numbering: Numbering::Continuous,
        }
    }
}

impl ListConfig {
    /// Parses a configuration from YAML. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse(path, e))
    }

    /// Spacing applied to every list unless its kind overrides the gap.
    pub fn spacing(&self) -> Spacing {
        Spacing {
            hsep: self.item_hsep,
            vsep: self.item_vsep,
        }
    }

    pub fn cycle_length(&self, construct: Construct) -> usize {
        match construct {
            Construct::Itemize => self.itemize_levels,
            Construct::Enumerate => self.enumerate_levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListConfig::default();
        assert_eq!(config.item_hsep, 3);
        assert_eq!(config.item_vsep, 0);
        assert_eq!(config.cycle_length(Construct::Itemize), 3);
        assert_eq!(config.cycle_length(Construct::Enumerate), 4);
        assert_eq!(config.numbering, Numbering::Continuous);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ListConfig::from_yaml("item_hsep: 5\ndepth_policy: clamp\n").unwrap();
        assert_eq!(config.item_hsep, 5);
        assert_eq!(config.depth_policy, DepthPolicy::Clamp);
        assert_eq!(config.enumerate_levels, 4);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ListConfig::from_yaml("  \n").unwrap(), ListConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ListConfig::from_yaml("item_gap: 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_spacing() {
        let config = ListConfig::from_yaml("item_hsep: 4\nitem_vsep: 1").unwrap();
        assert_eq!(config.spacing(), Spacing { hsep: 4, vsep: 1 });
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.yaml");
        std::fs::write(&path, "numbering: scoped\n").unwrap();

        let config = ListConfig::from_file(&path).unwrap();
        assert_eq!(config.numbering, Numbering::Scoped);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ListConfig::from_file("/nonexistent/lists.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
