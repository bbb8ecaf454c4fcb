//! Positional editing of expression trees.
//!
//! # Operations
//!
//! - `insert_at` / `insert_at_all`: insert a value at one path or at every
//!   path of a position set.
//! - `delete_at` / `delete_at_all`: remove the element at one path or at
//!   every path of a position set.
//! - `insert` / `delete`: dispatch on a [`PositionSpec`](symtree_position::PositionSpec).
//!
//! Every operation returns a new tree; the input is never mutated and every
//! subtree the edit does not pass through is shared with the result. A
//! failing path aborts the whole batch.

mod apply;
mod ledger;
mod registry;
pub mod types;

pub use apply::{
    delete, delete_at, delete_at_all, delete_at_all_with, delete_at_with, delete_with, insert,
    insert_at, insert_at_all, insert_at_all_with, insert_at_with, insert_with, Editor,
};
pub use types::{ConfigError, EditError, EditErrorKind, EditOptions};
