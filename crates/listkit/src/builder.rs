//! List construction: numbering items and composing them with their markers.
//!
//! [`ListBuilder`] renders one list instance of one kind. Each automatic item
//! advances the kind's counter exactly once, applies the kind's transform and
//! hands the token to the kind's layout. Explicit items (`item*`) supply their
//! own marker and leave the counter alone.
//!
//! Items are processed strictly in order, so numbering is reproducible for a
//! given input. The counter store is borrowed per call rather than held, which
//! lets a caller render nested lists between two items of the same builder.
//!
//! # Continuation
//!
//! A builder may carry a continuation template: the token of the item that
//! encloses it. Every automatic token is then prefixed with it, so an
//! `enumerate*` inside item `2` numbers `2.a`, `2.b`, ...
//!
//! ```rust
//! use listkit::{render_list, Block, CounterStore, KindRegistry, ListItem, Spacing};
//!
//! let registry = KindRegistry::standard();
//! let kind = registry.resolve("enumerate-2").unwrap();
//! let mut counters = CounterStore::new();
//! counters.declare(kind.counter()).unwrap();
//!
//! let items = vec![ListItem::text("first"), ListItem::text("second")];
//! let list = render_list(kind, &mut counters, items, Spacing::default(), Some("2")).unwrap();
//! assert_eq!(list.markers(), vec!["2.a.", "2.b."]);
//! ```

use tracing::{debug, trace};

use crate::counter::CounterStore;
use crate::error::Result;
use crate::registry::ListKind;
use crate::rendered::{Block, RenderedItem, RenderedList};

/// Horizontal and vertical spacing applied to a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spacing {
    /// Gap reserved for markers, in columns.
    pub hsep: usize,
    /// Blank lines around the list and between items.
    pub vsep: usize,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { hsep: 3, vsep: 0 }
    }
}

/// An item awaiting rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Explicit marker; `None` numbers the item automatically.
    pub marker: Option<String>,
    pub body: Vec<Block>,
}

impl ListItem {
    /// An automatically numbered item.
    pub fn new(body: Vec<Block>) -> Self {
        Self { marker: None, body }
    }

    /// An automatically numbered single-paragraph item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Block::text(text)])
    }

    /// An item with a caller-supplied marker.
    pub fn labeled(marker: impl Into<String>, body: Vec<Block>) -> Self {
        Self {
            marker: Some(marker.into()),
            body,
        }
    }
}

/// Builds one list instance of a single kind.
#[derive(Debug)]
pub struct ListBuilder<'k> {
    kind: &'k ListKind,
    spacing: Spacing,
    continuation: Option<String>,
    last_token: Option<String>,
    items: Vec<RenderedItem>,
}

impl<'k> ListBuilder<'k> {
    /// Starts a list of `kind`. A kind-level gap override wins over `spacing.hsep`.
    pub fn new(kind: &'k ListKind, spacing: Spacing) -> Self {
        let spacing = Spacing {
            hsep: kind.hsep().unwrap_or(spacing.hsep),
            ..spacing
        };
        Self {
            kind,
            spacing,
            continuation: None,
            last_token: None,
            items: Vec::new(),
        }
    }

    /// Prefixes every automatic token with `template` and a dot.
    pub fn with_continuation(mut self, template: Option<&str>) -> Self {
        self.continuation = template.map(str::to_string);
        self
    }

    pub fn kind(&self) -> &ListKind {
        self.kind
    }

    /// Advances the counter and returns the next automatic token.
    ///
    /// The token is remembered as the last marker of this list.
    pub fn next_token(&mut self, counters: &mut CounterStore) -> Result<String> {
        let value = counters.increment(self.kind.counter())?;
        let token = self.format(value)?;
        trace!(kind = self.kind.name(), value, token = %token, "numbered item");
        self.last_token = Some(token.clone());
        Ok(token)
    }

    /// Records an explicit marker without touching the counter.
    pub fn explicit_token(&mut self, marker: &str) -> String {
        self.last_token = Some(marker.to_string());
        marker.to_string()
    }

    /// Returns the token the current counter value displays as, without
    /// advancing it.
    pub fn the_item(&self, counters: &CounterStore) -> Result<String> {
        let value = counters.current(self.kind.counter())?;
        self.format(value)
    }

    /// Returns the token of the most recent item, automatic or explicit.
    pub fn last_token(&self) -> Option<&str> {
        self.last_token.as_deref()
    }

    /// Lays out an item under an already produced token.
    pub fn push(&mut self, token: &str, body: Vec<Block>) -> &RenderedItem {
        let item = self.kind.layout().compose(token, body, self.spacing.hsep);
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Renders an automatically numbered item.
    pub fn item(&mut self, counters: &mut CounterStore, body: Vec<Block>) -> Result<&RenderedItem> {
        let token = self.next_token(counters)?;
        Ok(self.push(&token, body))
    }

    /// Renders an item under a caller-supplied marker.
    pub fn item_star(&mut self, marker: &str, body: Vec<Block>) -> &RenderedItem {
        let token = self.explicit_token(marker);
        self.push(&token, body)
    }

    /// Wraps the items in the list's spacing context.
    pub fn finish(self) -> RenderedList {
        RenderedList {
            kind: self.kind.name().to_string(),
            indent: self.spacing.hsep,
            padding: self.spacing.vsep,
            items: self.items,
        }
    }

    fn format(&self, value: i64) -> Result<String> {
        let token = self.kind.transform().apply(value)?;
        Ok(match &self.continuation {
            Some(prefix) => format!("{}.{}", prefix, token),
            None => token,
        })
    }
}

/// Renders `items` as one list of `kind`.
///
/// The kind's counter advances once per automatic item. If any item fails,
/// the counter is restored to its value before the call and no output is
/// returned.
pub fn render_list(
    kind: &ListKind,
    counters: &mut CounterStore,
    items: Vec<ListItem>,
    spacing: Spacing,
    continuation: Option<&str>,
) -> Result<RenderedList> {
    let before = counters.current(kind.counter())?;
    let mut builder = ListBuilder::new(kind, spacing).with_continuation(continuation);

    for item in items {
        let outcome = match &item.marker {
            Some(marker) => {
                builder.item_star(marker, item.body);
                Ok(())
            }
            None => builder.item(counters, item.body).map(|_| ()),
        };
        if let Err(err) = outcome {
            counters.set(kind.counter(), before)?;
            return Err(err);
        }
    }

    let list = builder.finish();
    debug!(kind = %list.kind, items = list.len(), "rendered list");
    Ok(list)
}
