use symtree_expr::{Expr, Node};

use crate::types::Step;

/// Get the part of `tree` at `path`.
///
/// Index steps are 1-based and negative indices count from the end. On an
/// association an index step addresses the value of the n-th rule and a key
/// step the value stored under that key. Returns `None` when any step does
/// not resolve; index `0` (the head) is not a node and never resolves.
pub fn get<'a>(tree: &'a Expr, path: &[Step]) -> Option<&'a Expr> {
    let mut current = tree;
    for step in path {
        current = match (step, current.node()) {
            (Step::Index(i), Node::Composite { args, .. }) => args.get(resolve_index(*i, args.len())?)?,
            (Step::Index(i), Node::Association(rules)) => {
                rules.get(resolve_index(*i, rules.len())?)?.rule_value()?
            }
            (Step::Key(key), Node::Association(_)) => current.rule_for(key)?.rule_value()?,
            _ => return None,
        };
    }
    Some(current)
}

/// Zero-based offset of a 1-based, possibly negative index into `len` items.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let one_based = if index < 0 { len + index + 1 } else { index };
    if one_based < 1 || one_based > len {
        return None;
    }
    usize::try_from(one_based - 1).ok()
}
