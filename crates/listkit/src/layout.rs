//! Marker style primitives.
//!
//! A [`Layout`] decides where an item's marker sits relative to its body. It
//! combines three independent choices:
//!
//! - [`Placement`]: `aligned` (marker right-aligned in the hanging gap),
//!   `compact` (marker starts at half the gap) or `long` (marker on its own
//!   line, body below).
//! - `strong`: render the marker with the `item-strong` style.
//! - [`Suffix`]: punctuation appended to the token (`1.`, `a)`, `term —`).
//!
//! Layouts are pure: the same token, body and gap always produce the same
//! [`RenderedItem`].
//!
//! ## Geometry
//!
//! With gap `h` and decorated marker width `w` (all in columns, relative to the
//! list's left edge):
//!
//! | Placement | marker column | first body column | continuation |
//! |-----------|---------------|-------------------|--------------|
//! | aligned | `h - w - 1` (0 if too wide) | `max(h, w + 1)` | `h` |
//! | compact | `h / 2` | `max(h, h/2 + w + 1)` | `h` |
//! | long | `h / 2` | next line at `h` | `h` |
//!
//! ## Named Layouts
//!
//! [`Layout::builtin`] resolves the names used by kind catalogs:
//!
//! | Name | Placement | Strong | Suffix |
//! |------|-----------|--------|--------|
//! | `aligned-space` | aligned | no | none |
//! | `aligned-dot` | aligned | no | `.` |
//! | `aligned-bracket` | aligned | no | `)` |
//! | `aligned-strong-dot` | aligned | yes | `.` |
//! | `compact-space` | compact | no | none |
//! | `compact-strong-space` | compact | yes | none |
//! | `compact-strong-dot` | compact | yes | `.` |
//! | `compact-strong-dash` | compact | yes | ` —` |
//! | `long-compact-strong-dot` | long | yes | `.` |

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::rendered::{Block, Marker, MarkerGeometry, RenderedItem};
use crate::util::display_width;

/// Where the marker sits relative to the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Marker right-aligned inside the hanging gap.
    #[default]
    Aligned,
    /// Marker left-aligned at half the gap.
    Compact,
    /// Marker on its own line, body starting on the next one.
    Long,
}

/// Punctuation appended to a marker token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suffix {
    /// The token as is.
    #[default]
    Space,
    /// `1.`
    Dot,
    /// `a)`
    Bracket,
    /// `term —`
    Dash,
}

impl Suffix {
    /// Appends this suffix to a token.
    pub fn apply(&self, token: &str) -> String {
        match self {
            Suffix::Space => token.to_string(),
            Suffix::Dot => format!("{}.", token),
            Suffix::Bracket => format!("{})", token),
            Suffix::Dash => format!("{} —", token),
        }
    }
}

/// Composition rule for a marker plus body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    pub placement: Placement,
    pub strong: bool,
    pub suffix: Suffix,
}

static BUILTIN_LAYOUTS: Lazy<HashMap<&'static str, Layout>> = Lazy::new(|| {
    use Placement::*;
    use Suffix::*;

    let mut layouts = HashMap::new();
    layouts.insert("aligned-space", Layout::new(Aligned, false, Space));
    layouts.insert("aligned-dot", Layout::new(Aligned, false, Dot));
    layouts.insert("aligned-bracket", Layout::new(Aligned, false, Bracket));
    layouts.insert("aligned-strong-dot", Layout::new(Aligned, true, Dot));
    layouts.insert("compact-space", Layout::new(Compact, false, Space));
    layouts.insert("compact-strong-space", Layout::new(Compact, true, Space));
    layouts.insert("compact-strong-dot", Layout::new(Compact, true, Dot));
    layouts.insert("compact-strong-dash", Layout::new(Compact, true, Dash));
    layouts.insert("long-compact-strong-dot", Layout::new(Long, true, Dot));
    layouts
});

impl Layout {
    pub const fn new(placement: Placement, strong: bool, suffix: Suffix) -> Self {
        Self {
            placement,
            strong,
            suffix,
        }
    }

    /// Aligned hanging indent, no punctuation.
    pub const fn aligned() -> Self {
        Self::new(Placement::Aligned, false, Suffix::Space)
    }

    /// Compact hanging indent, no punctuation.
    pub const fn compact() -> Self {
        Self::new(Placement::Compact, false, Suffix::Space)
    }

    /// Marker on its own line.
    pub const fn long() -> Self {
        Self::new(Placement::Long, false, Suffix::Space)
    }

    /// Returns this layout with an emphasized marker.
    pub const fn strong(mut self) -> Self {
        self.strong = true;
        self
    }

    /// Returns this layout with the given suffix.
    pub const fn with_suffix(mut self, suffix: Suffix) -> Self {
        self.suffix = suffix;
        self
    }

    /// Resolves a named builtin layout.
    pub fn builtin(name: &str) -> Option<Layout> {
        BUILTIN_LAYOUTS.get(name).copied()
    }

    /// Returns the names of all builtin layouts, sorted.
    pub fn builtin_names() -> Vec<&'static str> {
        let mut names: Vec<_> = BUILTIN_LAYOUTS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the catalog name of this layout, if it is a builtin.
    pub fn builtin_name(&self) -> Option<&'static str> {
        BUILTIN_LAYOUTS
            .iter()
            .find(|(_, layout)| *layout == self)
            .map(|(name, _)| *name)
    }

    /// Computes where a marker of `marker_width` columns goes under gap `hsep`.
    pub fn geometry(&self, marker_width: usize, hsep: usize) -> MarkerGeometry {
        let half = hsep / 2;
        match self.placement {
            Placement::Aligned => {
                let fits = marker_width < hsep;
                MarkerGeometry {
                    marker_column: if fits { hsep - marker_width - 1 } else { 0 },
                    body_column: if fits { hsep } else { marker_width + 1 },
                    hang: hsep,
                    own_line: false,
                }
            }
            Placement::Compact => MarkerGeometry {
                marker_column: half,
                body_column: hsep.max(half + marker_width + 1),
                hang: hsep,
                own_line: false,
            },
            Placement::Long => MarkerGeometry {
                marker_column: half,
                body_column: hsep,
                hang: hsep,
                own_line: true,
            },
        }
    }

    /// Composes a formatted token with an item body.
    pub fn compose(&self, token: &str, body: Vec<Block>, hsep: usize) -> RenderedItem {
        let text = self.suffix.apply(token);
        let geometry = self.geometry(display_width(&text), hsep);
        RenderedItem {
            marker: Marker {
                token: token.to_string(),
                text,
                strong: self.strong,
            },
            geometry,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(Suffix::Space.apply("•"), "•");
        assert_eq!(Suffix::Dot.apply("1"), "1.");
        assert_eq!(Suffix::Bracket.apply("a"), "a)");
        assert_eq!(Suffix::Dash.apply("Term"), "Term —");
    }

    #[test]
    fn test_aligned_geometry_right_aligns_marker() {
        let geometry = Layout::aligned().geometry(2, 4);
        assert_eq!(geometry.marker_column, 1);
        assert_eq!(geometry.body_column, 4);
        assert_eq!(geometry.hang, 4);
        assert!(!geometry.own_line);
    }

    #[test]
    fn test_aligned_geometry_wide_marker_pushes_body() {
        let geometry = Layout::aligned().geometry(6, 3);
        assert_eq!(geometry.marker_column, 0);
        assert_eq!(geometry.body_column, 7);
        assert_eq!(geometry.hang, 3);
    }

    #[test]
    fn test_compact_geometry_uses_half_gap() {
        let geometry = Layout::compact().geometry(1, 4);
        assert_eq!(geometry.marker_column, 2);
        assert_eq!(geometry.body_column, 4);

        let wide = Layout::compact().geometry(8, 4);
        assert_eq!(wide.body_column, 11);
        assert_eq!(wide.hang, 4);
    }

    #[test]
    fn test_long_geometry_breaks_line() {
        let geometry = Layout::long().geometry(5, 4);
        assert!(geometry.own_line);
        assert_eq!(geometry.marker_column, 2);
        assert_eq!(geometry.body_column, 4);
    }

    #[test]
    fn test_strong_composes_with_placement() {
        let layout = Layout::compact().strong().with_suffix(Suffix::Dot);
        assert_eq!(layout, Layout::builtin("compact-strong-dot").unwrap());
        let item = layout.compose("Note", vec![Block::text("body")], 3);
        assert!(item.marker.strong);
        assert_eq!(item.marker.text, "Note.");
        assert_eq!(item.marker.token, "Note");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let layout = Layout::builtin("aligned-dot").unwrap();
        let a = layout.compose("3", vec![Block::text("x")], 3);
        let b = layout.compose("3", vec![Block::text("x")], 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_names() {
        let names = Layout::builtin_names();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"long-compact-strong-dot"));
        assert!(Layout::builtin("aligned-fancy").is_none());
    }

    #[test]
    fn test_builtin_name_round_trip() {
        for name in Layout::builtin_names() {
            let layout = Layout::builtin(name).unwrap();
            assert_eq!(layout.builtin_name(), Some(name));
        }
    }
}
