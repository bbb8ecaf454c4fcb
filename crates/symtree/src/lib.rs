//! symtree: copy-on-write insertion and deletion at positions of immutable
//! expression trees.
//!
//! A batch of positions is applied in one pass. Nodes along the paths are
//! drafted once, indices keep referring to the original numbering, and the
//! result shares every untouched subtree with the input.
//!
//! # Example
//!
//! ```
//! use symtree::insert_at_all;
//! use symtree_expr::Expr;
//! use symtree_position::Step;
//!
//! let tree = Expr::list(vec![Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c")]);
//! let positions = vec![vec![Step::Index(2)], vec![Step::Index(2)]];
//! let out = insert_at_all(&tree, &Expr::symbol("v"), &positions).unwrap();
//! assert_eq!(out.to_string(), "{a, v, v, b, c}");
//! ```

pub mod cli;
pub mod edit;

pub use edit::{
    delete, delete_at, delete_at_all, delete_at_all_with, delete_at_with, delete_with, insert,
    insert_at, insert_at_all, insert_at_all_with, insert_at_with, insert_with, ConfigError,
    EditError, EditErrorKind, EditOptions, Editor,
};
