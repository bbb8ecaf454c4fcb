//! Type definitions for positions.

use std::fmt;

use symtree_expr::Expr;

/// A step in a position path.
///
/// `Index` is 1-based; negative values count from the end. `Key` addresses a
/// rule of an association by its key.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Index(i64),
    Key(Expr),
}

/// A position path from the root.
pub type Path = Vec<Step>;

/// An ordered batch of paths applied against one tree.
pub type PositionSet = Vec<Path>;

impl Step {
    /// A string key step, the common case for associations built from JSON.
    pub fn key(name: impl Into<String>) -> Self {
        Step::Key(Expr::string(name))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Step::Index(_))
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Step::Key(_))
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            Step::Index(i) => Some(*i),
            Step::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&Expr> {
        match self {
            Step::Key(k) => Some(k),
            Step::Index(_) => None,
        }
    }
}

impl From<i64> for Step {
    fn from(index: i64) -> Self {
        Step::Index(index)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(i) => write!(f, "{i}"),
            Step::Key(k) if k.as_str().is_some() => write!(f, "{k}"),
            Step::Key(k) => write!(f, "Key[{k}]"),
        }
    }
}

/// The host's position argument: one path, or a batch of paths.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionSpec {
    Single(Path),
    Many(PositionSet),
}

impl PositionSpec {
    /// All paths in application order.
    pub fn paths(&self) -> &[Path] {
        match self {
            PositionSpec::Single(path) => std::slice::from_ref(path),
            PositionSpec::Many(paths) => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_accessors() {
        let i = Step::from(-2);
        assert!(i.is_index());
        assert_eq!(i.as_index(), Some(-2));
        assert_eq!(i.as_key(), None);

        let k = Step::key("a");
        assert!(k.is_key());
        assert_eq!(k.as_key(), Some(&Expr::string("a")));
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::Index(3).to_string(), "3");
        assert_eq!(Step::key("a").to_string(), "\"a\"");
        assert_eq!(Step::Key(Expr::symbol("b")).to_string(), "Key[b]");
    }

    #[test]
    fn spec_paths() {
        let single = PositionSpec::Single(vec![Step::Index(1)]);
        assert_eq!(single.paths().len(), 1);
        let many = PositionSpec::Many(vec![vec![Step::Index(1)], vec![Step::Index(2)]]);
        assert_eq!(many.paths().len(), 2);
    }
}
