//! Random expression trees for property tests and fuzzing.
//!
//! - `leaf.rs`: random atoms (integers, reals, strings, symbols)
//! - `random_expr.rs`: random trees grown one node at a time, together with
//!   the positions of every container they hold
//!
//! Generation is driven by a seeded xoshiro256** generator, so a failing
//! property can be replayed from the seed alone.

pub mod leaf;
pub mod random_expr;

pub use leaf::{gen_integer, gen_real, gen_string, gen_symbol};
pub use random_expr::{NodeKind, NodeOdds, RandomExpr, RandomExprOptions, RootNode};
