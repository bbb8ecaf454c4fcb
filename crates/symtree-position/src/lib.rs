//! Positions into expression trees.
//!
//! A position is a path of steps from the root: 1-based (possibly negative)
//! indices and association keys. This crate parses positions from host
//! expressions, JSON and pointer text, formats them for diagnostics,
//! validates them and extracts parts.
//!
//! # Example
//!
//! ```
//! use symtree_expr::Expr;
//! use symtree_position::{format_path, get, parse_pointer, Step};
//!
//! let path = parse_pointer("/2/-1").unwrap();
//! assert_eq!(path, vec![Step::Index(2), Step::Index(-1)]);
//! assert_eq!(format_path(&path), "{2, -1}");
//!
//! let tree = Expr::list(vec![Expr::int(1), Expr::list(vec![Expr::int(2), Expr::int(3)])]);
//! assert_eq!(get(&tree, &path), Some(&Expr::int(3)));
//! ```

use thiserror::Error;

pub mod get;
pub mod parse;
pub mod types;
pub mod util;
pub mod validate;

pub use get::get;
pub use parse::{
    path_from_expr, path_from_json, position_spec_from_expr, position_spec_from_json,
    step_from_expr, step_from_json,
};
pub use types::{Path, PositionSet, PositionSpec, Step};
pub use util::{
    escape_component, format_path, format_pointer, is_child, is_integer_component,
    is_path_equal, is_root, parent, parse_pointer, unescape_component,
};
pub use validate::{validate_path, validate_position_set, ValidationError, MAX_PATH_LENGTH};

/// Errors raised while reading positions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("pointer {0:?} must be empty or start with '/'")]
    InvalidPointer(String),
    #[error("index {0} is out of range")]
    IndexOutOfRange(String),
    #[error("{0} is not a valid position step")]
    NotAStep(String),
    #[error("the root position has no parent")]
    NoParent,
}
