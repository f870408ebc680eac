//! Outline documents and the per-document render context.
//!
//! An outline is a sequence of paragraphs and lists, usually loaded from YAML:
//!
//! ```yaml
//! - Shopping
//! - list: itemize
//!   items:
//!     - Fruit
//!     - body:
//!         - Vegetables
//!         - list: enumerate*
//!           items: [Carrots, Leeks]
//!     - marker: "!"
//!       body: [Don't forget the milk]
//! ```
//!
//! A list names either a nesting construct (`itemize`, `enumerate`), whose
//! kind is picked by the current depth, or a registered kind such as
//! `enumerate-roman`. A trailing `*` continues the numbering of the
//! enclosing item: `enumerate*` inside item `2` numbers `2.a`, `2.b`.
//!
//! Items are a bare string (one paragraph, automatic marker) or a mapping with
//! an optional `marker` and a `body` of paragraphs and nested lists.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::builder::ListBuilder;
use crate::catalog::Catalog;
use crate::config::{ListConfig, Numbering};
use crate::counter::CounterStore;
use crate::error::{ConfigError, ListError, Result};
use crate::layout::Layout;
use crate::nesting::{Construct, LevelResolver};
use crate::registry::{KindRegistry, ListKind};
use crate::rendered::{Block, RenderedList};
use crate::transform::Transform;

/// What a list node renders as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListTarget {
    /// Kind chosen by nesting depth.
    Construct(Construct),
    /// A registered kind, used at any depth.
    Kind(String),
}

/// A list reference such as `itemize`, `enumerate*` or `enumerate-roman`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListRef {
    pub target: ListTarget,
    /// Prefix tokens with the enclosing item's marker.
    pub continued: bool,
}

impl ListRef {
    pub fn construct(construct: Construct) -> Self {
        Self {
            target: ListTarget::Construct(construct),
            continued: false,
        }
    }

    pub fn kind(name: impl Into<String>) -> Self {
        Self {
            target: ListTarget::Kind(name.into()),
            continued: false,
        }
    }

    /// Returns this reference in its starred form.
    pub fn continued(mut self) -> Self {
        self.continued = true;
        self
    }

    /// Parses `name` or `name*`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, continued) = match s.strip_suffix('*') {
            Some(name) => (name, true),
            None => (s, false),
        };
        if name.is_empty() {
            return Err(ListError::UnknownListKind(s.to_string()));
        }
        let target = match Construct::from_name(name) {
            Some(construct) => ListTarget::Construct(construct),
            None => ListTarget::Kind(name.to_string()),
        };
        Ok(Self { target, continued })
    }
}

impl fmt::Display for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            ListTarget::Construct(construct) => write!(f, "{}", construct)?,
            ListTarget::Kind(name) => f.write_str(name)?,
        }
        if self.continued {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ListRef {
    type Error = ListError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ListRef> for String {
    fn from(list: ListRef) -> Self {
        list.to_string()
    }
}

/// A list and its items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListNode {
    pub list: ListRef,
    #[serde(default)]
    pub items: Vec<ItemNode>,
}

impl ListNode {
    pub fn new(list: ListRef, items: Vec<ItemNode>) -> Self {
        Self { list, items }
    }
}

/// One item of a list node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct ItemNode {
    /// Explicit marker; absent items are numbered automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    pub body: Vec<Content>,
}

impl ItemNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            marker: None,
            body: vec![Content::Text(text.into())],
        }
    }

    pub fn labeled(marker: impl Into<String>, body: Vec<Content>) -> Self {
        Self {
            marker: Some(marker.into()),
            body,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRepr {
    Text(String),
    Full {
        #[serde(default)]
        marker: Option<String>,
        #[serde(default)]
        body: Vec<Content>,
    },
}

impl From<ItemRepr> for ItemNode {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Text(text) => ItemNode::text(text),
            ItemRepr::Full { marker, body } => ItemNode { marker, body },
        }
    }
}

/// A paragraph or a nested list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    List(ListNode),
}

/// Parses an outline document from YAML.
pub fn parse_outline(yaml: &str) -> Result<Vec<Content>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Numbering state for one document.
///
/// Owns the document's counters and nesting depths together with the kinds
/// they are declared for. Contexts are independent: two documents rendered
/// with separate contexts never share counters.
#[derive(Debug, Clone)]
pub struct RenderContext {
    registry: KindRegistry,
    counters: CounterStore,
    levels: LevelResolver,
    config: ListConfig,
}

impl RenderContext {
    /// Creates a context and declares a counter for every registered kind.
    ///
    /// A construct's cycle never exceeds its registered levels: with
    /// `itemize-1..=4` registered, `itemize_levels: 6` cycles through 4.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidCycleLength`] if the configuration sets a
    /// cycle length of 0.
    pub fn new(registry: KindRegistry, config: ListConfig) -> Result<Self> {
        let levels = LevelResolver::new(
            effective_cycle(&registry, &config, Construct::Itemize),
            effective_cycle(&registry, &config, Construct::Enumerate),
            config.depth_policy,
        )?;
        let mut counters = CounterStore::new();
        for kind in registry.kinds() {
            counters.declare(kind.counter())?;
        }
        Ok(Self {
            registry,
            counters,
            levels,
            config,
        })
    }

    /// The standard kinds with default configuration.
    pub fn standard() -> Result<Self> {
        Self::new(KindRegistry::standard(), ListConfig::default())
    }

    /// Registers a kind and declares its counter.
    pub fn register_list_kind(
        &mut self,
        name: &str,
        layout: Layout,
        transform: Transform,
    ) -> Result<()> {
        self.register(ListKind::new(name, layout, transform))
    }

    /// Registers a fully built kind and declares its counter.
    pub fn register(&mut self, kind: ListKind) -> Result<()> {
        if self.registry.contains(kind.name()) {
            return Err(ListError::DuplicateListKind(kind.name().to_string()));
        }
        if self.counters.contains(kind.counter()) {
            return Err(ListError::DuplicateCounter(kind.counter().to_string()));
        }
        let counter = kind.counter().to_string();
        self.registry.register(kind)?;
        self.counters.declare(&counter)?;

        // A new `<construct>-<level>` kind may lift the cap on the cycle.
        for construct in Construct::ALL {
            let cycle = effective_cycle(&self.registry, &self.config, construct);
            if cycle != self.levels.cycle_length(construct) {
                self.levels.set_cycle_length(construct, cycle)?;
            }
        }
        Ok(())
    }

    /// Registers every kind of a loaded catalog.
    pub fn register_catalog(&mut self, catalog: &Catalog) -> std::result::Result<(), ConfigError> {
        for kind in catalog.kinds() {
            self.register(kind.clone())?;
        }
        Ok(())
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    /// Mutable access for hosts that set or reset counters between lists.
    pub fn counters_mut(&mut self) -> &mut CounterStore {
        &mut self.counters
    }

    pub fn levels(&self) -> &LevelResolver {
        &self.levels
    }

    /// Returns the token the kind's counter currently displays as.
    pub fn the_item(&self, kind: &str) -> Result<String> {
        let kind = self.registry.resolve(kind)?;
        ListBuilder::new(kind, self.config.spacing()).the_item(&self.counters)
    }

    /// Renders a list tree.
    ///
    /// On error every counter and depth is left as it was before the call.
    pub fn render(&mut self, node: &ListNode) -> Result<RenderedList> {
        let counters = self.counters.clone();
        let levels = self.levels.clone();
        let outcome = self.render_node(node, None);
        if outcome.is_err() {
            self.counters = counters;
            self.levels = levels;
        }
        outcome
    }

    /// Renders a sequence of paragraphs and lists, stopping at the first error.
    pub fn render_document(&mut self, content: &[Content]) -> Result<Vec<Block>> {
        content
            .iter()
            .map(|block| match block {
                Content::Text(text) => Ok(Block::Text(text.clone())),
                Content::List(node) => self.render(node).map(Block::List),
            })
            .collect()
    }

    fn render_node(&mut self, node: &ListNode, enclosing: Option<&str>) -> Result<RenderedList> {
        let (kind_name, construct) = match &node.list.target {
            ListTarget::Construct(construct) => (self.levels.enter(*construct), Some(*construct)),
            ListTarget::Kind(name) => (name.clone(), None),
        };
        let continuation = if node.list.continued { enclosing } else { None };

        let outcome = self.render_kind(&kind_name, node, continuation);
        if let Some(construct) = construct {
            self.levels.exit(construct);
        }
        outcome
    }

    #[instrument(level = "debug", skip(self, node), fields(items = node.items.len()))]
    fn render_kind(
        &mut self,
        kind_name: &str,
        node: &ListNode,
        continuation: Option<&str>,
    ) -> Result<RenderedList> {
        let kind = Arc::clone(self.registry.resolve(kind_name)?);
        let scoped = self.config.numbering == Numbering::Scoped;

        let before = self.counters.current(kind.counter())?;
        if scoped {
            self.counters.set(kind.counter(), 0)?;
        }
        let outcome = self.render_items(&kind, node, continuation);
        if scoped {
            self.counters.set(kind.counter(), before)?;
        }
        outcome
    }

    fn render_items(
        &mut self,
        kind: &ListKind,
        node: &ListNode,
        continuation: Option<&str>,
    ) -> Result<RenderedList> {
        let mut builder =
            ListBuilder::new(kind, self.config.spacing()).with_continuation(continuation);

        for item in &node.items {
            // The marker is produced before the body so nested lists see it.
            let token = match &item.marker {
                Some(marker) => builder.explicit_token(marker),
                None => builder.next_token(&mut self.counters)?,
            };
            let body = self.render_body(&item.body, &token)?;
            builder.push(&token, body);
        }

        let list = builder.finish();
        debug!(kind = %list.kind, items = list.len(), "rendered list");
        Ok(list)
    }

    fn render_body(&mut self, body: &[Content], token: &str) -> Result<Vec<Block>> {
        body.iter()
            .map(|content| match content {
                Content::Text(text) => Ok(Block::Text(text.clone())),
                Content::List(node) => self.render_node(node, Some(token)).map(Block::List),
            })
            .collect()
    }
}

/// Number of consecutive levels `<construct>-1`, `<construct>-2`, ... that
/// are registered.
fn registered_levels(registry: &KindRegistry, construct: Construct) -> usize {
    (1..)
        .take_while(|level| registry.contains(&format!("{}-{}", construct.name(), level)))
        .count()
}

/// The configured cycle length, capped at the registered levels.
///
/// Without any registered level the configured length is kept, so a list of
/// the construct reports the missing `<construct>-1` kind.
fn effective_cycle(registry: &KindRegistry, config: &ListConfig, construct: Construct) -> usize {
    let requested = config.cycle_length(construct);
    match registered_levels(registry, construct) {
        0 => requested,
        registered if requested > registered => {
            debug!(
                construct = %construct,
                requested,
                registered,
                "cycle length exceeds registered levels"
            );
            registered
        }
        _ => requested,
    }
}
