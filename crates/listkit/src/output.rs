//! Output mode control for rendering.
//!
//! The [`OutputMode`] enum determines how rendered lists leave the engine:
//! as terminal text with or without ANSI codes, with bracket debug tags, or
//! serialized as JSON or YAML.

use std::fmt;
use std::str::FromStr;

use console::Term;
use serde::Serialize;

use crate::error::Result;

/// Controls how output is rendered.
///
/// - `Auto` - Detect terminal capabilities automatically (default behavior)
/// - `Term` - Always include ANSI escape codes
/// - `Text` - Never include ANSI escape codes
/// - `TermDebug` - Render style names as bracket tags for debugging
/// - `Json` - Serialize the rendered structure as JSON
/// - `Yaml` - Serialize the rendered structure as YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
    /// Always use ANSI escape codes (terminal output)
    Term,
    /// Never use ANSI escape codes (plain text)
    Text,
    /// Debug mode: render style names as bracket tags `[name]text[/name]`
    TermDebug,
    /// Structured output: the rendered tree as JSON
    Json,
    /// Structured output: the rendered tree as YAML
    Yaml,
}

impl OutputMode {
    pub const NAMES: [&'static str; 6] = ["auto", "term", "text", "term-debug", "json", "yaml"];

    /// Resolves the output mode to a concrete decision about whether to use color.
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
            OutputMode::TermDebug => false, // Handled specially
            OutputMode::Json | OutputMode::Yaml => false,
        }
    }

    /// Returns true if this is debug mode (bracket tags instead of ANSI).
    pub fn is_debug(&self) -> bool {
        matches!(self, OutputMode::TermDebug)
    }

    /// Returns true for modes that serialize instead of laying out text.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Auto => "auto",
            OutputMode::Term => "term",
            OutputMode::Text => "text",
            OutputMode::TermDebug => "term-debug",
            OutputMode::Json => "json",
            OutputMode::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            "term-debug" | "term_debug" | "debug" => Ok(OutputMode::TermDebug),
            "json" => Ok(OutputMode::Json),
            "yaml" | "yml" => Ok(OutputMode::Yaml),
            other => Err(format!(
                "unknown output mode '{}' (expected one of: {})",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Serializes rendered output for a structured mode.
///
/// Returns `None` for text modes, which go through
/// [`TextRenderer`](crate::TextRenderer) instead.
pub fn serialize<T: Serialize + ?Sized>(value: &T, mode: OutputMode) -> Option<Result<String>> {
    match mode {
        OutputMode::Json => Some(serde_json::to_string_pretty(value).map_err(Into::into)),
        OutputMode::Yaml => Some(serde_yaml::to_string(value).map_err(Into::into)),
        _ => None,
    }
}
