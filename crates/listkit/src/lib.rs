//! # Listkit - Nesting-Aware Lists
//!
//! `listkit` numbers and lays out itemized, enumerated and description lists.
//! A list kind pairs a marker layout with a numbering transform; nesting picks
//! a different kind at each depth, and every kind numbers through its own
//! named counter.
//!
//! ## Core Concepts
//!
//! - [`CounterStore`]: named integer counters, one per list kind
//! - [`Transform`]: ordinal to token (`3` to `c`, `iii`, `III`, `•`)
//! - [`Layout`]: where a marker sits (aligned, compact, long), whether it is
//!   strong, and its suffix
//! - [`KindRegistry`]: kind name to layout and transform
//! - [`ListBuilder`] / [`render_list`]: number items and compose them with markers
//! - [`LevelResolver`]: nesting depth to kind (`itemize-1`, `itemize-2`, ...)
//! - [`RenderContext`]: all of the above for one document
//! - [`TextRenderer`]: lay out the result as terminal text
//!
//! ## Quick Start
//!
//! ```rust
//! use listkit::{parse_outline, OutputMode, RenderContext, TextRenderer};
//!
//! let outline = parse_outline(r#"
//! - list: enumerate
//!   items:
//!     - Gather
//!     - body:
//!         - Sort
//!         - list: enumerate
//!           items: [by size, by color]
//! "#).unwrap();
//!
//! let mut ctx = RenderContext::standard().unwrap();
//! let blocks = ctx.render_document(&outline).unwrap();
//!
//! let text = TextRenderer::default()
//!     .with_mode(OutputMode::Text)
//!     .render_blocks(&blocks);
//! assert_eq!(text, "1. Gather\n2. Sort\n   a. by size\n   b. by color");
//! ```
//!
//! ## Custom Kinds
//!
//! Kinds are registered by name, from code or from a YAML [`Catalog`]:
//!
//! ```rust
//! use listkit::{Layout, ListNode, ListRef, ItemNode, RenderContext, Suffix, Transform};
//!
//! let mut ctx = RenderContext::standard().unwrap();
//! ctx.register_list_kind(
//!     "steps",
//!     Layout::compact().strong().with_suffix(Suffix::Dot),
//!     Transform::RomanUpper,
//! ).unwrap();
//!
//! let node = ListNode::new(
//!     ListRef::kind("steps"),
//!     vec![ItemNode::text("Plan"), ItemNode::text("Build")],
//! );
//! let list = ctx.render(&node).unwrap();
//! assert_eq!(list.markers(), vec!["I.", "II."]);
//! ```
//!
//! ## Errors
//!
//! Engine operations return [`ListError`]; loading configuration, catalogs
//! and themes returns [`ConfigError`]. A list that fails to render leaves
//! every counter as it was.

mod builder;
mod catalog;
mod config;
mod counter;
mod document;
mod error;
mod layout;
mod nesting;
pub mod output;
mod registry;
mod rendered;
mod text;
pub mod theme;
mod transform;
pub mod util;

// Error types
pub use error::{ConfigError, ListError, Result};

// Engine
pub use builder::{render_list, ListBuilder, ListItem, Spacing};
pub use counter::CounterStore;
pub use layout::{Layout, Placement, Suffix};
pub use nesting::{Construct, DepthPolicy, LevelResolver};
pub use registry::{KindRegistry, ListKind, DESCRIPTION_MARKER};
pub use transform::{to_roman, Transform, ALPHA_MAX, ROMAN_MAX};

// Rendered structure
pub use rendered::{Block, Marker, MarkerGeometry, RenderedItem, RenderedList};

// Documents and configuration
pub use catalog::Catalog;
pub use config::{ListConfig, Numbering};
pub use document::{
    parse_outline, Content, ItemNode, ListNode, ListRef, ListTarget, RenderContext,
};

// Output
pub use output::OutputMode;
pub use text::TextRenderer;
pub use theme::{StyleValue, Theme, MARKER_STYLE, STRONG_STYLE};
