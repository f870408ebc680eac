//! YAML catalogs of additional list kinds.
//!
//! Style authors declare new list flavors from the builtin primitives without
//! writing code:
//!
//! ```yaml
//! kinds:
//!   steps:
//!     layout: compact-strong-dot
//!     transform: Roman
//!   checklist:
//!     layout: aligned-space
//!     literal: "☐"
//!     hsep: 4
//! ```
//!
//! `layout` defaults to `aligned-space` and `transform` to `arabic`. A kind may
//! name a `transform` or a `literal` marker, not both.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::layout::Layout;
use crate::registry::{KindRegistry, ListKind};
use crate::transform::Transform;

const DEFAULT_LAYOUT: &str = "aligned-space";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    kinds: BTreeMap<String, KindDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KindDef {
    layout: Option<String>,
    transform: Option<String>,
    literal: Option<String>,
    hsep: Option<usize>,
}

impl KindDef {
    fn into_kind(self, name: String) -> Result<ListKind, ConfigError> {
        let layout_name = self.layout.as_deref().unwrap_or(DEFAULT_LAYOUT);
        let layout = Layout::builtin(layout_name).ok_or_else(|| ConfigError::UnknownLayout {
            kind: name.clone(),
            layout: layout_name.to_string(),
        })?;

        let transform = match (self.transform, self.literal) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidKind {
                    kind: name,
                    message: "set either 'transform' or 'literal', not both".to_string(),
                })
            }
            (None, Some(symbol)) => Transform::literal(symbol),
            (Some(transform), None) => Transform::from_name(&transform).ok_or_else(|| {
                ConfigError::UnknownTransform {
                    kind: name.clone(),
                    transform,
                }
            })?,
            (None, None) => Transform::Arabic,
        };

        let kind = ListKind::new(name, layout, transform);
        Ok(match self.hsep {
            Some(hsep) => kind.with_hsep(hsep),
            None => kind,
        })
    }
}

/// List kinds loaded from YAML, in name order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kinds: Vec<ListKind>,
}

impl Catalog {
    /// Parses a catalog from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads a catalog file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse(path, e))?;
        let kinds = file
            .kinds
            .into_iter()
            .map(|(name, def)| def.into_kind(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kinds })
    }

    pub fn kinds(&self) -> &[ListKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Registers every kind, stopping at the first name clash.
    pub fn register_into(&self, registry: &mut KindRegistry) -> Result<(), ConfigError> {
        for kind in &self.kinds {
            registry.register(kind.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListError;
    use crate::layout::Placement;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_yaml(
            r#"
            kinds:
              steps:
                layout: compact-strong-dot
                transform: Roman
              checklist:
                literal: "☐"
                hsep: 4
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        // BTreeMap ordering
        let checklist = &catalog.kinds()[0];
        assert_eq!(checklist.name(), "checklist");
        assert_eq!(checklist.layout(), Layout::builtin("aligned-space").unwrap());
        assert_eq!(checklist.transform().apply(3).unwrap(), "☐");
        assert_eq!(checklist.hsep(), Some(4));

        let steps = &catalog.kinds()[1];
        assert_eq!(steps.layout().placement, Placement::Compact);
        assert_eq!(steps.transform().apply(4).unwrap(), "IV");
    }

    #[test]
    fn test_defaults_to_arabic() {
        let catalog = Catalog::from_yaml("kinds:\n  plain: {}\n").unwrap();
        assert_eq!(catalog.kinds()[0].transform().name(), "arabic");
    }

    #[test]
    fn test_unknown_layout() {
        let err = Catalog::from_yaml("kinds:\n  x:\n    layout: sideways\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownLayout { ref layout, .. } if layout == "sideways"
        ));
    }

    #[test]
    fn test_unknown_transform() {
        let err = Catalog::from_yaml("kinds:\n  x:\n    transform: greek\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownTransform { ref transform, .. } if transform == "greek"
        ));
    }

    #[test]
    fn test_transform_and_literal_conflict() {
        let err = Catalog::from_yaml("kinds:\n  x:\n    transform: alpha\n    literal: '*'\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKind { .. }));
    }

    #[test]
    fn test_register_into_detects_clash() {
        let catalog = Catalog::from_yaml("kinds:\n  itemize-1:\n    literal: '+'\n").unwrap();
        let mut registry = KindRegistry::standard();
        let err = catalog.register_into(&mut registry).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Registration(ListError::DuplicateListKind(_))
        ));
    }

    #[test]
    fn test_register_into_adds_kinds() {
        let catalog = Catalog::from_yaml("kinds:\n  steps:\n    transform: roman\n").unwrap();
        let mut registry = KindRegistry::standard();
        let before = registry.len();
        catalog.register_into(&mut registry).unwrap();
        assert_eq!(registry.len(), before + 1);
        assert!(registry.contains("steps"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Catalog::from_yaml("kinds: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
