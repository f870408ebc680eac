//! Renderable output of the list engine.
//!
//! The engine returns these structures instead of printing. A host layout
//! engine reads the geometry directly; [`TextRenderer`](crate::TextRenderer)
//! is the bundled backend that flattens them into terminal lines.

use serde::Serialize;

/// A piece of item body content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum Block {
    /// A paragraph of text, opaque to the list engine.
    Text(String),
    /// A nested list.
    List(RenderedList),
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text(text.into())
    }
}

/// The marker drawn in front of an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Marker {
    /// Token before decoration (`"2"`, `"iv"`, `"•"`); starred lists chain on it.
    pub token: String,
    /// Token with its layout suffix (`"2."`).
    pub text: String,
    /// Render with the emphasized marker style.
    pub strong: bool,
}

/// Horizontal placement of a marker and its body, in columns from the list's
/// left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MarkerGeometry {
    pub marker_column: usize,
    /// Column where the first body line starts.
    pub body_column: usize,
    /// Column where wrapped and following body lines start.
    pub hang: usize,
    /// The marker occupies a line of its own.
    pub own_line: bool,
}

/// One laid-out list item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedItem {
    pub marker: Marker,
    pub geometry: MarkerGeometry,
    pub body: Vec<Block>,
}

/// A fully numbered list, wrapped in its spacing context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedList {
    /// Name of the list kind that produced it.
    pub kind: String,
    /// Horizontal gap reserved for markers.
    pub indent: usize,
    /// Blank lines above, below and between items.
    pub padding: usize,
    pub items: Vec<RenderedItem>,
}

impl RenderedList {
    /// Returns the decorated markers of the top-level items, in order.
    pub fn markers(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.marker.text.as_str()).collect()
    }

    /// Returns the number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
