//! Core types for the edit module: errors and options.

use serde::Deserialize;
use symtree_expr::Expr;
use symtree_position::{format_path, Path, Step, MAX_PATH_LENGTH};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

/// Failure of an edit. Any error aborts the whole batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    #[error("Part {} of {tree} does not exist.", format_path(.path))]
    PartNotFound { path: Path, tree: Expr },
    #[error("Cannot insert at position {index} in {target}.")]
    CannotInsert { index: i64, target: Expr },
    #[error("Cannot {operation} at position {{}} in {tree}.")]
    EmptyPosition { operation: &'static str, tree: Expr },
    #[error("Position {} has {len} steps, more than the limit of {max}.", format_path(.path))]
    PathTooLong { path: Path, len: usize, max: usize },
    #[error("The argument {value} is not a rule or a list of rules.")]
    NotRule { value: Expr, target: Expr },
    #[error("Position step {step} cannot address {target}.")]
    UnsupportedStep { step: Step, target: Expr },
}

/// Coarse classification of [`EditError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditErrorKind {
    /// A step does not resolve, or the position is empty or too long.
    Position,
    /// The value cannot be stored in the target container.
    Type,
    /// The step kind does not fit the container kind.
    UnsupportedPathStep,
}

impl EditError {
    pub fn kind(&self) -> EditErrorKind {
        match self {
            EditError::PartNotFound { .. }
            | EditError::CannotInsert { .. }
            | EditError::EmptyPosition { .. }
            | EditError::PathTooLong { .. } => EditErrorKind::Position,
            EditError::NotRule { .. } => EditErrorKind::Type,
            EditError::UnsupportedStep { .. } => EditErrorKind::UnsupportedPathStep,
        }
    }
}

// ── Options ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid edit options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Editor configuration.
///
/// ```
/// use symtree::EditOptions;
///
/// let opts = EditOptions::from_toml_str("splice_lists = false").unwrap();
/// assert!(!opts.splice_lists);
/// assert_eq!(opts.max_path_len, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditOptions {
    /// Splice the elements of a non-empty `List` value into ordered targets
    /// instead of inserting the list as a single element. An empty list is
    /// always inserted as one element. Associations always splice lists of
    /// rules.
    pub splice_lists: bool,
    /// Longest accepted path.
    pub max_path_len: usize,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            splice_lists: true,
            max_path_len: MAX_PATH_LENGTH,
        }
    }
}

impl EditOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
