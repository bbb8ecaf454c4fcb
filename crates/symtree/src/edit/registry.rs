//! Copy-on-write registry: the drafts of one editor invocation.
//!
//! A draft is a shallow mutable copy of a node: same head (or association
//! kind), and a spine of slots that keep referring to the original children
//! until a child is drafted itself. Drafts live in an arena owned by the
//! editor; a parent slot records the arena handle of a drafted child, so every
//! later descent through that site reaches the same draft.

use log::trace;
use symtree_expr::{Expr, Node, Symbol};

use super::ledger::IndexLedger;

pub(crate) type DraftId = usize;

/// One child position of a draft.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    /// Untouched child, shared with the original tree.
    Shared(Expr),
    /// Drafted child.
    Draft(DraftId),
    /// Association rule whose value has been drafted.
    RuleValue {
        head: Symbol,
        key: Expr,
        value: DraftId,
    },
}

impl Slot {
    /// Key of the rule in this slot, if it holds one.
    pub(crate) fn rule_key(&self) -> Option<&Expr> {
        match self {
            Slot::Shared(rule) => rule.rule_key(),
            Slot::RuleValue { key, .. } => Some(key),
            Slot::Draft(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum DraftKind {
    Composite(Symbol),
    Association,
}

#[derive(Debug)]
pub(crate) struct Draft {
    /// The node this draft was copied from.
    pub(crate) origin: Expr,
    pub(crate) kind: DraftKind,
    pub(crate) slots: Vec<Slot>,
    pub(crate) ledger: IndexLedger,
}

impl Draft {
    pub(crate) fn is_association(&self) -> bool {
        matches!(self.kind, DraftKind::Association)
    }

    /// Current 1-based position of the rule stored under `key`.
    pub(crate) fn rule_position(&self, key: &Expr) -> Option<usize> {
        if !self.is_association() {
            return None;
        }
        self.slots
            .iter()
            .position(|slot| slot.rule_key() == Some(key))
            .map(|i| i + 1)
    }
}

#[derive(Debug, Default)]
pub(crate) struct CowRegistry {
    drafts: Vec<Draft>,
}

impl CowRegistry {
    pub(crate) fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Draft for the node in `slot`, allocating it on first touch.
    ///
    /// Returns `None` for atoms, which cannot be descended into.
    pub(crate) fn resolve(&mut self, slot: &Slot) -> Option<DraftId> {
        let expr = match slot {
            Slot::Draft(id) => return Some(*id),
            Slot::RuleValue { value, .. } => return Some(*value),
            Slot::Shared(expr) => expr,
        };
        let kind = match expr.node() {
            Node::Atom(_) => return None,
            Node::Composite { head, .. } => DraftKind::Composite(head.clone()),
            Node::Association(_) => DraftKind::Association,
        };
        let id = self.drafts.len();
        trace!("drafting {:?} as #{id}", expr.node_id());
        self.drafts.push(Draft {
            origin: expr.clone(),
            kind,
            slots: expr.args().iter().cloned().map(Slot::Shared).collect(),
            ledger: IndexLedger::default(),
        });
        Some(id)
    }

    pub(crate) fn get(&self, id: DraftId) -> &Draft {
        &self.drafts[id]
    }

    pub(crate) fn get_mut(&mut self, id: DraftId) -> &mut Draft {
        &mut self.drafts[id]
    }

    /// Rebuild an immutable tree from `slot`.
    ///
    /// Shared slots are returned as-is, so untouched subtrees keep their
    /// identity in the result.
    pub(crate) fn freeze(&self, slot: &Slot) -> Expr {
        match slot {
            Slot::Shared(expr) => expr.clone(),
            Slot::Draft(id) => self.freeze_draft(*id),
            Slot::RuleValue { head, key, value } => {
                Expr::composite(head.clone(), vec![key.clone(), self.freeze_draft(*value)])
            }
        }
    }

    fn freeze_draft(&self, id: DraftId) -> Expr {
        let draft = &self.drafts[id];
        let args: Vec<Expr> = draft.slots.iter().map(|slot| self.freeze(slot)).collect();
        match &draft.kind {
            DraftKind::Composite(head) => Expr::composite(head.clone(), args),
            // Keys were kept unique while editing.
            DraftKind::Association => Expr::from_node(Node::Association(args)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_reuses_drafted_slot() {
        let mut registry = CowRegistry::default();
        let tree = Expr::list(vec![Expr::int(1)]);
        let id = registry.resolve(&Slot::Shared(tree.clone())).unwrap();
        assert_eq!(registry.resolve(&Slot::Draft(id)), Some(id));
        assert_eq!(registry.len(), 1);
        assert!(Expr::ptr_eq(&registry.get(id).origin, &tree));
    }

    #[test]
    fn equal_but_distinct_nodes_get_separate_drafts() {
        let mut registry = CowRegistry::default();
        let a = registry.resolve(&Slot::Shared(Expr::list(vec![]))).unwrap();
        let b = registry.resolve(&Slot::Shared(Expr::list(vec![]))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn atoms_are_not_drafted() {
        let mut registry = CowRegistry::default();
        assert_eq!(registry.resolve(&Slot::Shared(Expr::int(1))), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn freeze_untouched_draft_shares_children() {
        let child = Expr::list(vec![Expr::int(1)]);
        let tree = Expr::composite("f", vec![child.clone()]);
        let mut registry = CowRegistry::default();
        let id = registry.resolve(&Slot::Shared(tree.clone())).unwrap();
        let frozen = registry.freeze(&Slot::Draft(id));
        assert_eq!(frozen, tree);
        assert!(!Expr::ptr_eq(&frozen, &tree));
        assert!(Expr::ptr_eq(frozen.arg(1).unwrap(), &child));
    }

    #[test]
    fn draft_finds_rules_by_key() {
        let assoc = Expr::association(vec![
            Expr::rule(Expr::string("a"), Expr::int(1)),
            Expr::rule(Expr::string("b"), Expr::int(2)),
        ])
        .unwrap();
        let mut registry = CowRegistry::default();
        let id = registry.resolve(&Slot::Shared(assoc)).unwrap();
        assert_eq!(registry.get(id).rule_position(&Expr::string("b")), Some(2));
        assert_eq!(registry.get(id).rule_position(&Expr::string("z")), None);
    }

    #[test]
    fn drafted_rule_value_keeps_its_key() {
        let inner = Expr::list(vec![Expr::int(1)]);
        let assoc = Expr::association(vec![
            Expr::rule(Expr::string("a"), Expr::int(1)),
            Expr::rule(Expr::string("b"), inner.clone()),
        ])
        .unwrap();
        let mut registry = CowRegistry::default();
        let id = registry.resolve(&Slot::Shared(assoc.clone())).unwrap();
        let value = registry.resolve(&Slot::Shared(inner)).unwrap();
        registry.get_mut(id).slots[1] = Slot::RuleValue {
            head: assoc.arg(2).unwrap().head().unwrap().clone(),
            key: Expr::string("b"),
            value,
        };
        assert_eq!(registry.get(id).rule_position(&Expr::string("b")), Some(2));
        assert_eq!(Slot::Draft(value).rule_key(), None);
        assert_eq!(registry.freeze(&Slot::Draft(id)), assoc);
    }
}
