//! Nesting depth tracking for itemize and enumerate.
//!
//! Each nesting construct keeps its own depth. Entering a list of a construct
//! increments that depth and selects the kind `<construct>-<level>`, where the
//! level cycles through `1..=cycle_length`:
//!
//! ```text
//! itemize, cycle 3:  depth 1 2 3 4 5 6 7
//!                    level 1 2 3 1 2 3 1
//! ```
//!
//! Under [`DepthPolicy::Clamp`] depths past the cycle stay on the last level
//! instead of wrapping.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ListError, Result};

/// A list category whose nested levels pick different kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Construct {
    Itemize,
    Enumerate,
}

impl Construct {
    pub const ALL: [Construct; 2] = [Construct::Itemize, Construct::Enumerate];

    /// Prefix of the kinds this construct cycles through.
    pub fn name(&self) -> &'static str {
        match self {
            Construct::Itemize => "itemize",
            Construct::Enumerate => "enumerate",
        }
    }

    /// Default number of levels before wrapping.
    pub fn default_cycle_length(&self) -> usize {
        match self {
            Construct::Itemize => 3,
            Construct::Enumerate => 4,
        }
    }

    /// Parses `itemize` or `enumerate`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "itemize" => Some(Construct::Itemize),
            "enumerate" => Some(Construct::Enumerate),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Construct::Itemize => 0,
            Construct::Enumerate => 1,
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens when nesting goes deeper than the cycle length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthPolicy {
    /// Reuse the outer levels' kinds: 1, 2, 3, 1, 2, 3, ...
    #[default]
    Wrap,
    /// Stay on the deepest kind: 1, 2, 3, 3, 3, ...
    Clamp,
}

#[derive(Clone, Copy, Debug)]
struct Level {
    depth: usize,
    cycle: usize,
}

/// Per-document depth state for every nesting construct.
#[derive(Clone, Debug)]
pub struct LevelResolver {
    levels: [Level; 2],
    policy: DepthPolicy,
}

impl LevelResolver {
    /// Creates a resolver at depth 0 for both constructs.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidCycleLength`] if either cycle length is 0.
    pub fn new(
        itemize_levels: usize,
        enumerate_levels: usize,
        policy: DepthPolicy,
    ) -> Result<Self> {
        let mut resolver = Self {
            levels: [Level { depth: 0, cycle: 1 }; 2],
            policy,
        };
        resolver.set_cycle_length(Construct::Itemize, itemize_levels)?;
        resolver.set_cycle_length(Construct::Enumerate, enumerate_levels)?;
        Ok(resolver)
    }

    /// Changes a construct's cycle length. Lists already open keep their kinds.
    pub fn set_cycle_length(&mut self, construct: Construct, cycle: usize) -> Result<()> {
        if cycle == 0 {
            return Err(ListError::InvalidCycleLength {
                construct: construct.name().to_string(),
            });
        }
        self.levels[construct.index()].cycle = cycle;
        Ok(())
    }

    pub fn cycle_length(&self, construct: Construct) -> usize {
        self.levels[construct.index()].cycle
    }

    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    /// Current depth; 0 outside any list of the construct.
    pub fn depth(&self, construct: Construct) -> usize {
        self.levels[construct.index()].depth
    }

    /// Enters a nested list and returns the kind name for the new depth.
    pub fn enter(&mut self, construct: Construct) -> String {
        self.levels[construct.index()].depth += 1;
        self.kind_for_depth(construct, self.depth(construct))
    }

    /// Leaves the innermost list of the construct.
    pub fn exit(&mut self, construct: Construct) {
        let level = &mut self.levels[construct.index()];
        if level.depth == 0 {
            warn!(construct = %construct, "exit without matching enter");
            return;
        }
        level.depth -= 1;
    }

    /// Maps a depth (1-based) to the level it renders with.
    pub fn level_for_depth(&self, construct: Construct, depth: usize) -> usize {
        let cycle = self.cycle_length(construct);
        let depth = depth.max(1);
        match self.policy {
            DepthPolicy::Wrap => (depth - 1) % cycle + 1,
            DepthPolicy::Clamp => depth.min(cycle),
        }
    }

    /// Maps a depth (1-based) to a kind name such as `itemize-2`.
    pub fn kind_for_depth(&self, construct: Construct, depth: usize) -> String {
        format!(
            "{}-{}",
            construct.name(),
            self.level_for_depth(construct, depth)
        )
    }
}

impl Default for LevelResolver {
    fn default() -> Self {
        Self {
            levels: [
                Level {
                    depth: 0,
                    cycle: Construct::Itemize.default_cycle_length(),
                },
                Level {
                    depth: 0,
                    cycle: Construct::Enumerate.default_cycle_length(),
                },
            ],
            policy: DepthPolicy::Wrap,
        }
    }
}
