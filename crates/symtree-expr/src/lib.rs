//! Immutable expression trees for symtree.
//!
//! Nodes are published once and never mutated. An [`Expr`] handle is an
//! `Arc`, so cloning a handle shares the subtree and untouched parts of an
//! edited tree are the very same objects as in the input.
//!
//! # Example
//!
//! ```
//! use symtree_expr::Expr;
//!
//! let x = Expr::list(vec![Expr::int(1), Expr::int(2)]);
//! let f = Expr::composite("f", vec![x.clone(), Expr::symbol("y")]);
//! assert!(Expr::ptr_eq(f.arg(1).unwrap(), &x));
//! assert_eq!(f.to_string(), "f[{1, 2}, y]");
//! ```

pub mod display;
pub mod expr;
pub mod json;
pub mod symbol;

pub use expr::{Atom, Expr, ExprError, Node, NodeId};
pub use json::{from_json, to_json, JsonConvertError};
pub use symbol::{heads, Symbol};
