//! Registry of list kinds.
//!
//! A list kind binds a name to a [`Layout`] and a [`Transform`]; its counter
//! carries the same name. Keeping layout and transform separate lets one
//! placement rule serve every numbering scheme.
//!
//! [`KindRegistry::standard`] registers the stock catalog:
//!
//! | Kind | Layout | Marker |
//! |------|--------|--------|
//! | `itemize-1` .. `itemize-4` | `aligned-space` | `•` `◦` `-` `·` |
//! | `enumerate-1` .. `enumerate-4` | `aligned-dot` | `1.` `a.` `i.` `A.` |
//! | `itemize-minus`, `itemize-dot`, `itemize-arrow` | `aligned-space` | `-` `•` `→` |
//! | `enumerate-numeric`, `enumerate-roman`, `enumerate-Roman` | `aligned-dot` | `1.` `i.` `I.` |
//! | `enumerate-alpha`, `enumerate-Alpha` | `aligned-bracket` | `a)` `A)` |
//! | `description`, `description-compact` | `compact-strong-dot` | `∗.` |
//! | `description-aligned` | `aligned-strong-dot` | `∗.` |
//! | `description-dash` | `compact-strong-dash` | `∗ —` |
//! | `description-long` | `long-compact-strong-dot` | `∗.` |

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ListError, Result};
use crate::layout::Layout;
use crate::transform::Transform;

/// Default marker of description lists, normally replaced by `item*` labels.
pub const DESCRIPTION_MARKER: &str = "∗";

/// A registered numbering and layout scheme.
#[derive(Debug, Clone)]
pub struct ListKind {
    name: String,
    layout: Layout,
    transform: Transform,
    hsep: Option<usize>,
}

impl ListKind {
    pub fn new(name: impl Into<String>, layout: Layout, transform: Transform) -> Self {
        Self {
            name: name.into(),
            layout,
            transform,
            hsep: None,
        }
    }

    /// Overrides the configured horizontal gap for this kind.
    pub fn with_hsep(mut self, hsep: usize) -> Self {
        self.hsep = Some(hsep);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Name of the backing counter.
    pub fn counter(&self) -> &str {
        &self.name
    }

    /// Per-kind gap override, if any.
    pub fn hsep(&self) -> Option<usize> {
        self.hsep
    }
}

/// Name-to-kind table consulted when rendering lists.
///
/// Kinds are stored behind `Arc`, so cloning a registry for each document is
/// cheap.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: HashMap<String, Arc<ListKind>>,
}

impl KindRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard itemize, enumerate and
    /// description kinds.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for kind in standard_kinds() {
            registry.kinds.insert(kind.name.clone(), Arc::new(kind));
        }
        registry
    }

    /// Binds `name` to a layout and transform.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::DuplicateListKind`] if the name is taken.
    pub fn register_list_kind(
        &mut self,
        name: &str,
        layout: Layout,
        transform: Transform,
    ) -> Result<()> {
        self.register(ListKind::new(name, layout, transform))
    }

    /// Registers a fully built kind.
    pub fn register(&mut self, kind: ListKind) -> Result<()> {
        if self.kinds.contains_key(&kind.name) {
            return Err(ListError::DuplicateListKind(kind.name));
        }
        debug!(
            kind = %kind.name,
            layout = ?kind.layout,
            transform = kind.transform.name(),
            "registered list kind"
        );
        self.kinds.insert(kind.name.clone(), Arc::new(kind));
        Ok(())
    }

    /// Returns the kind bound to `name`.
    pub fn resolve(&self, name: &str) -> Result<&Arc<ListKind>> {
        self.kinds
            .get(name)
            .ok_or_else(|| ListError::UnknownListKind(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Returns the registered kind names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterates over all registered kinds in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &ListKind> {
        self.kinds.values().map(|kind| kind.as_ref())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn standard_kinds() -> Vec<ListKind> {
    let builtin = |name: &str| Layout::builtin(name).unwrap_or_default();
    let aligned_space = builtin("aligned-space");
    let aligned_dot = builtin("aligned-dot");
    let aligned_bracket = builtin("aligned-bracket");
    let description = || Transform::literal(DESCRIPTION_MARKER);

    vec![
        ListKind::new("itemize-1", aligned_space, Transform::literal("•")),
        ListKind::new("itemize-2", aligned_space, Transform::literal("◦")),
        ListKind::new("itemize-3", aligned_space, Transform::literal("-")),
        ListKind::new("itemize-4", aligned_space, Transform::literal("·")),
        ListKind::new("enumerate-1", aligned_dot, Transform::Arabic),
        ListKind::new("enumerate-2", aligned_dot, Transform::AlphaLower),
        ListKind::new("enumerate-3", aligned_dot, Transform::RomanLower),
        ListKind::new("enumerate-4", aligned_dot, Transform::AlphaUpper),
        ListKind::new("itemize-minus", aligned_space, Transform::literal("-")),
        ListKind::new("itemize-dot", aligned_space, Transform::literal("•")),
        ListKind::new("itemize-arrow", aligned_space, Transform::literal("→")),
        ListKind::new("enumerate-numeric", aligned_dot, Transform::Arabic),
        ListKind::new("enumerate-roman", aligned_dot, Transform::RomanLower),
        ListKind::new("enumerate-Roman", aligned_dot, Transform::RomanUpper),
        ListKind::new("enumerate-alpha", aligned_bracket, Transform::AlphaLower),
        ListKind::new("enumerate-Alpha", aligned_bracket, Transform::AlphaUpper),
        ListKind::new("description", builtin("compact-strong-dot"), description()),
        ListKind::new(
            "description-compact",
            builtin("compact-strong-dot"),
            description(),
        ),
        ListKind::new(
            "description-aligned",
            builtin("aligned-strong-dot"),
            description(),
        ),
        ListKind::new(
            "description-dash",
            builtin("compact-strong-dash"),
            description(),
        ),
        ListKind::new(
            "description-long",
            builtin("long-compact-strong-dot"),
            description(),
        ),
    ]
}
