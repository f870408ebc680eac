//! Error types for list registration, numbering and rendering.
//!
//! [`ListError`] is returned by every engine operation. All of its variants are
//! configuration or programming errors: a well-formed style catalog never
//! produces them at render time, and none are retried. The host decides
//! whether to abort or substitute a fallback marker.
//!
//! [`ConfigError`] covers loading configuration, catalogs and themes from YAML.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the counter store, the kind registry and the list builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// A counter with this name was already declared.
    #[error("counter '{0}' is already declared")]
    DuplicateCounter(String),

    /// The counter was never declared.
    #[error("unknown counter '{0}'")]
    UnknownCounter(String),

    /// A list kind with this name was already registered.
    #[error("list kind '{0}' is already registered")]
    DuplicateListKind(String),

    /// The list kind was never registered.
    #[error("unknown list kind '{0}'")]
    UnknownListKind(String),

    /// Advancing the counter would overflow.
    #[error("counter '{0}' overflowed")]
    CounterOverflow(String),

    /// The ordinal lies outside the domain of the transform.
    #[error("ordinal {ordinal} is out of range for the {transform} transform")]
    TransformRange { transform: String, ordinal: i64 },

    /// A nesting construct was configured with a cycle length of zero.
    #[error("cycle length for {construct} must be at least 1")]
    InvalidCycleLength { construct: String },

    /// Structured output (JSON/YAML) could not be produced.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ListError {
    fn from(err: serde_json::Error) -> Self {
        ListError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ListError {
    fn from(err: serde_yaml::Error) -> Self {
        ListError::Serialization(err.to_string())
    }
}

/// Result type for list engine operations.
pub type Result<T> = std::result::Result<T, ListError>;

/// Errors raised while loading configuration, kind catalogs or themes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parse error.
    #[error("failed to parse {}: {message}", display_path(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML parser.
        message: String,
    },

    /// File could not be read.
    #[error("failed to load: {message}")]
    Load { message: String },

    /// A catalog entry names a layout that is not builtin.
    #[error("list kind '{kind}' uses unknown layout '{layout}'")]
    UnknownLayout { kind: String, layout: String },

    /// A catalog entry names a transform that is not builtin.
    #[error("list kind '{kind}' uses unknown transform '{transform}'")]
    UnknownTransform { kind: String, transform: String },

    /// A catalog entry is malformed.
    #[error("invalid list kind '{kind}': {message}")]
    InvalidKind { kind: String, message: String },

    /// A theme entry could not be turned into a style.
    #[error("invalid style '{style}': {message}")]
    InvalidStyle { style: String, message: String },

    /// Registering a loaded definition failed.
    #[error("registration failed: {0}")]
    Registration(#[from] ListError),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "yaml".to_string(),
    }
}

impl ConfigError {
    pub(crate) fn parse(path: Option<&std::path::Path>, err: impl std::fmt::Display) -> Self {
        ConfigError::Parse {
            path: path.map(|p| p.to_path_buf()),
            message: err.to_string(),
        }
    }

    pub(crate) fn read(path: &std::path::Path, err: std::io::Error) -> Self {
        ConfigError::Load {
            message: format!("failed to read {}: {}", path.display(), err),
        }
    }
}
