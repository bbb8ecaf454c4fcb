#![allow(dead_code)]

use symtree_expr::Expr;
use symtree_position::{Path, Step};

pub fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

/// `{a, b, ...}` from symbol names.
pub fn symbols(names: &[&str]) -> Expr {
    Expr::list(names.iter().map(|n| sym(n)).collect())
}

pub fn path(steps: &[i64]) -> Path {
    steps.iter().map(|&i| Step::Index(i)).collect()
}

pub fn paths(sets: &[&[i64]]) -> Vec<Path> {
    sets.iter().map(|steps| path(steps)).collect()
}

/// `"key" -> value`
pub fn rule(key: &str, value: Expr) -> Expr {
    Expr::rule(Expr::string(key), value)
}

pub fn assoc(rules: Vec<Expr>) -> Expr {
    Expr::association(rules).unwrap()
}

/// Asserts `a` and `b` are the same node object.
pub fn assert_shared(a: &Expr, b: &Expr) {
    assert!(Expr::ptr_eq(a, b), "expected {a} to be shared, got a copy {b}");
}
