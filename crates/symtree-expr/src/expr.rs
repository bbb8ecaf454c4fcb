//! The expression node model.
//!
//! An [`Expr`] is a cheap handle to an immutable [`Node`]. Cloning the handle
//! shares the node, so a subtree reachable from two parents is one object.
//! Editing never mutates a published node: editors build new nodes that
//! reference the untouched children of the old ones.

use std::sync::Arc;

use thiserror::Error;

use crate::symbol::{heads, Symbol};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("{0} is not a rule")]
    NotARule(Expr),
}

// ── Node ──────────────────────────────────────────────────────────────────

/// Scalar leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Integer(i64),
    Real(f64),
    Str(String),
    Symbol(Symbol),
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(Atom),
    /// `head[arg1, arg2, ...]`, arguments are 1-indexed from the outside.
    Composite { head: Symbol, args: Vec<Expr> },
    /// `<|k1 -> v1, k2 -> v2, ...|>`. Every element is a rule and keys are unique.
    Association(Vec<Expr>),
}

/// Identity of a node object, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Shared handle to an immutable expression node.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Expr::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::real(value)
    }
}

impl Expr {
    // ── Construction ──────────────────────────────────────────────────────

    /// Wraps a node without checking association invariants.
    ///
    /// Callers building associations must only pass rules with unique keys;
    /// [`Expr::association`] is the checked alternative.
    pub fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    pub fn int(value: i64) -> Self {
        Self::from_node(Node::Atom(Atom::Integer(value)))
    }

    pub fn real(value: f64) -> Self {
        Self::from_node(Node::Atom(Atom::Real(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::from_node(Node::Atom(Atom::Str(value.into())))
    }

    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Self::from_node(Node::Atom(Atom::Symbol(name.into())))
    }

    pub fn composite(head: impl Into<Symbol>, args: Vec<Expr>) -> Self {
        Self::from_node(Node::Composite {
            head: head.into(),
            args,
        })
    }

    pub fn list(args: Vec<Expr>) -> Self {
        Self::composite(heads::LIST, args)
    }

    /// `key -> value`
    pub fn rule(key: Expr, value: Expr) -> Self {
        Self::composite(heads::RULE, vec![key, value])
    }

    /// `key :> value`
    pub fn rule_delayed(key: Expr, value: Expr) -> Self {
        Self::composite(heads::RULE_DELAYED, vec![key, value])
    }

    /// `Key[key]`, the explicit key wrapper used in positions.
    pub fn key(key: Expr) -> Self {
        Self::composite(heads::KEY, vec![key])
    }

    pub fn empty_association() -> Self {
        Self::from_node(Node::Association(Vec::new()))
    }

    /// Builds an association from rules.
    ///
    /// A rule whose key is already present replaces the earlier rule at its
    /// position, so keys stay unique and keep their first-seen order.
    pub fn association(rules: Vec<Expr>) -> Result<Self, ExprError> {
        let mut out: Vec<Expr> = Vec::with_capacity(rules.len());
        for rule in rules {
            let existing = {
                let key = rule
                    .rule_key()
                    .ok_or_else(|| ExprError::NotARule(rule.clone()))?;
                out.iter().position(|r| r.rule_key() == Some(key))
            };
            match existing {
                Some(i) => out[i] = rule,
                None => out.push(rule),
            }
        }
        Ok(Self::from_node(Node::Association(out)))
    }

    // ── Identity ──────────────────────────────────────────────────────────

    /// True when both handles point at the same node object.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.0) as usize)
    }

    // ── Classification ────────────────────────────────────────────────────

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn is_atom(&self) -> bool {
        matches!(*self.0, Node::Atom(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(*self.0, Node::Composite { .. })
    }

    pub fn is_association(&self) -> bool {
        matches!(*self.0, Node::Association(_))
    }

    /// Composite or association: something a path can descend into.
    pub fn is_container(&self) -> bool {
        !self.is_atom()
    }

    pub fn head(&self) -> Option<&Symbol> {
        match &*self.0 {
            Node::Composite { head, .. } => Some(head),
            _ => None,
        }
    }

    pub fn has_head(&self, name: &str) -> bool {
        self.head().is_some_and(|h| h.is(name))
    }

    pub fn is_list(&self) -> bool {
        self.has_head(heads::LIST)
    }

    pub fn is_rule(&self) -> bool {
        match &*self.0 {
            Node::Composite { head, args } => {
                args.len() == 2 && (head.is(heads::RULE) || head.is(heads::RULE_DELAYED))
            }
            _ => false,
        }
    }

    /// A `List` whose arguments are all rules. The empty list qualifies.
    pub fn is_list_of_rules(&self) -> bool {
        self.is_list() && self.args().iter().all(Expr::is_rule)
    }

    // ── Access ────────────────────────────────────────────────────────────

    /// Number of arguments (composite) or rules (association). Atoms have none.
    pub fn len(&self) -> usize {
        self.args().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Composite arguments or association rules.
    pub fn args(&self) -> &[Expr] {
        match &*self.0 {
            Node::Atom(_) => &[],
            Node::Composite { args, .. } => args,
            Node::Association(rules) => rules,
        }
    }

    /// 1-based argument (or rule) access.
    pub fn arg(&self, i: usize) -> Option<&Expr> {
        i.checked_sub(1).and_then(|i| self.args().get(i))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match &*self.0 {
            Node::Atom(Atom::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &*self.0 {
            Node::Atom(Atom::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &*self.0 {
            Node::Atom(Atom::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    pub fn rule_key(&self) -> Option<&Expr> {
        if self.is_rule() {
            self.arg(1)
        } else {
            None
        }
    }

    pub fn rule_value(&self) -> Option<&Expr> {
        if self.is_rule() {
            self.arg(2)
        } else {
            None
        }
    }

    /// 1-based position of the rule with `key` in an association.
    pub fn rule_position(&self, key: &Expr) -> Option<usize> {
        if !self.is_association() {
            return None;
        }
        self.args()
            .iter()
            .position(|r| r.rule_key() == Some(key))
            .map(|i| i + 1)
    }

    /// The rule stored under `key` in an association.
    pub fn rule_for(&self, key: &Expr) -> Option<&Expr> {
        self.rule_position(key).and_then(|p| self.arg(p))
    }

    /// Value of the `i`-th (1-based) rule of an association.
    pub fn value_at(&self, i: usize) -> Option<&Expr> {
        if !self.is_association() {
            return None;
        }
        self.arg(i).and_then(Expr::rule_value)
    }

    /// Copy of a composite with its `i`-th (1-based) argument replaced.
    ///
    /// The other arguments are shared with `self`.
    pub fn with_arg(&self, i: usize, value: Expr) -> Option<Expr> {
        match &*self.0 {
            Node::Composite { head, args } if i >= 1 && i <= args.len() => {
                let mut args = args.clone();
                args[i - 1] = value;
                Some(Expr::composite(head.clone(), args))
            }
            _ => None,
        }
    }
}
