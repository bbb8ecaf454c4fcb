//! Path-directed insertion and deletion.
//!
//! Both directions share one descent: each call consumes one step, drafts the
//! node it passes through and either recurses or performs the terminal edit.
//! Indices in a path always refer to the *original* numbering of the node;
//! the draft's ledger translates them to the current numbering.

use log::{debug, trace};
use symtree_expr::Expr;
use symtree_position::{
    format_path, validate_path, validate_position_set, Path, PositionSpec, Step, ValidationError,
};

use super::ledger::LedgerMode;
use super::registry::{CowRegistry, DraftId, Slot};
use super::types::{EditError, EditOptions};

// ── Edit direction ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Edit<'v> {
    Insert(&'v Expr),
    Delete,
}

impl Edit<'_> {
    fn mode(self) -> LedgerMode {
        match self {
            Edit::Insert(_) => LedgerMode::Insert,
            Edit::Delete => LedgerMode::Remove,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Edit::Insert(_) => "insert",
            Edit::Delete => "delete",
        }
    }
}

/// Maps a 1-based (possibly negative) index into `1..=slots`.
fn normalize_index(index: i64, slots: usize) -> Option<usize> {
    let slots = i64::try_from(slots).ok()?;
    let p = if index < 0 { slots + index + 1 } else { index };
    if (1..=slots).contains(&p) {
        usize::try_from(p).ok()
    } else {
        None
    }
}

// ── Editor ────────────────────────────────────────────────────────────────

/// One insertion or deletion batch over a tree.
///
/// Paths are applied in order against the progressively edited tree. Nodes
/// are drafted the first time a path passes through them and every later
/// path reuses the draft, so indices of all paths refer to the numbering of
/// the original tree. [`Editor::finish`] freezes the drafts into a new tree
/// that shares every untouched subtree with the input.
///
/// ```
/// use symtree::Editor;
/// use symtree_expr::Expr;
/// use symtree_position::Step;
///
/// let tree = Expr::list(vec![Expr::symbol("a"), Expr::symbol("b")]);
/// let v = Expr::symbol("v");
/// let mut editor = Editor::insert(&tree, &v);
/// editor.apply(&[Step::Index(2)]).unwrap();
/// editor.apply(&[Step::Index(-1)]).unwrap();
/// assert_eq!(editor.finish().to_string(), "{a, v, b, v}");
/// ```
#[derive(Debug)]
pub struct Editor<'v> {
    tree: Expr,
    edit: Edit<'v>,
    options: EditOptions,
    registry: CowRegistry,
    root: Slot,
}

impl<'v> Editor<'v> {
    /// Editor inserting `value` at every applied path.
    pub fn insert(tree: &Expr, value: &'v Expr) -> Self {
        Self::new(tree, Edit::Insert(value))
    }

    /// Editor removing the element at every applied path.
    pub fn delete(tree: &Expr) -> Self {
        Self::new(tree, Edit::Delete)
    }

    fn new(tree: &Expr, edit: Edit<'v>) -> Self {
        Self {
            tree: tree.clone(),
            edit,
            options: EditOptions::default(),
            registry: CowRegistry::default(),
            root: Slot::Shared(tree.clone()),
        }
    }

    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of nodes drafted so far.
    pub fn draft_count(&self) -> usize {
        self.registry.len()
    }

    /// Applies the edit at `path`.
    ///
    /// An empty path is a no-op. On error nothing has been inserted or
    /// removed, although nodes along the path may have been drafted.
    pub fn apply(&mut self, path: &[Step]) -> Result<(), EditError> {
        if path.is_empty() {
            return Ok(());
        }
        validate_path(path, self.options.max_path_len).map_err(|err| match err {
            ValidationError::PathTooLong { len, max } => EditError::PathTooLong {
                path: path.to_vec(),
                len,
                max,
            },
            ValidationError::EmptyPath { .. } => self.empty_position(),
        })?;
        debug!(
            "{} at {} ({} drafts)",
            self.edit.name(),
            format_path(path),
            self.registry.len()
        );
        let Some(root) = self.registry.resolve(&self.root) else {
            return Err(self.not_found(path));
        };
        self.root = Slot::Draft(root);
        self.descend(root, path, 0)
    }

    /// Applies the edit at every path of `positions`, in order.
    ///
    /// An empty path anywhere in the batch fails before any node is drafted.
    pub fn apply_all(&mut self, positions: &[Path]) -> Result<(), EditError> {
        validate_position_set(positions, usize::MAX).map_err(|err| match err {
            ValidationError::EmptyPath { index } => {
                debug!("position {index} of the batch is empty");
                self.empty_position()
            }
            ValidationError::PathTooLong { len, max } => EditError::PathTooLong {
                path: positions
                    .iter()
                    .find(|path| path.len() == len)
                    .cloned()
                    .unwrap_or_default(),
                len,
                max,
            },
        })?;
        for path in positions {
            self.apply(path)?;
        }
        Ok(())
    }

    /// Freezes the drafts into the edited tree.
    pub fn finish(self) -> Expr {
        self.registry.freeze(&self.root)
    }

    // ── Descent ───────────────────────────────────────────────────────────

    fn descend(&mut self, id: DraftId, path: &[Step], depth: usize) -> Result<(), EditError> {
        let terminal = depth + 1 == path.len();
        trace!("{} step {} at depth {depth}, draft #{id}", self.edit.name(), path[depth]);
        match &path[depth] {
            Step::Key(key) => self.key_step(id, key, path, depth, terminal),
            Step::Index(index) => self.index_step(id, *index, path, depth, terminal),
        }
    }

    fn key_step(
        &mut self,
        id: DraftId,
        key: &Expr,
        path: &[Step],
        depth: usize,
        terminal: bool,
    ) -> Result<(), EditError> {
        let draft = self.registry.get(id);
        if !draft.is_association() {
            return Err(EditError::UnsupportedStep {
                step: Step::Key(key.clone()),
                target: draft.origin.clone(),
            });
        }
        let Some(current) = draft.rule_position(key) else {
            let removed = draft.origin.rule_position(key).is_some();
            if terminal && removed && matches!(self.edit, Edit::Delete) {
                trace!("key {key} already removed");
                return Ok(());
            }
            return Err(self.not_found(path));
        };
        if !terminal {
            return self.descend_into(id, current, path, depth);
        }
        let original = draft.ledger.to_original(current, self.edit.mode());
        match self.edit {
            Edit::Insert(value) => {
                let rules = self.check_rules(value, id)?;
                self.splice_rules(id, current, original, rules);
            }
            Edit::Delete => self.remove_slot(id, current, original),
        }
        Ok(())
    }

    fn index_step(
        &mut self,
        id: DraftId,
        index: i64,
        path: &[Step],
        depth: usize,
        terminal: bool,
    ) -> Result<(), EditError> {
        let edit = self.edit;
        let mode = edit.mode();
        let draft = self.registry.get(id);
        let original_len = draft.ledger.original_len(draft.slots.len(), mode);
        let inserting = terminal && matches!(edit, Edit::Insert(_));
        let Some(original) = normalize_index(index, original_len + usize::from(inserting)) else {
            return Err(if inserting {
                self.cannot_insert(index, id)
            } else {
                self.not_found(path)
            });
        };
        let current = draft.ledger.to_current(original, mode);

        match (edit, terminal, current) {
            (Edit::Insert(value), true, Some(current)) => {
                self.insert_element(id, index, original, current, value)
            }
            (Edit::Delete, true, Some(current)) => {
                self.remove_slot(id, current, original);
                Ok(())
            }
            (Edit::Delete, true, None) => {
                trace!("index {original} already removed");
                Ok(())
            }
            (_, false, Some(current)) => self.descend_into(id, current, path, depth),
            // The element was removed earlier in this batch.
            (_, _, None) => Err(self.not_found(path)),
        }
    }

    /// Drafts the child at `current` and continues with the next step.
    fn descend_into(
        &mut self,
        id: DraftId,
        current: usize,
        path: &[Step],
        depth: usize,
    ) -> Result<(), EditError> {
        let draft = self.registry.get(id);
        let is_association = draft.is_association();
        let Some(slot) = draft.slots.get(current - 1).cloned() else {
            return Err(self.not_found(path));
        };

        let next = match slot {
            Slot::Draft(child) | Slot::RuleValue { value: child, .. } => child,
            // Passing through a rule edits its value.
            Slot::Shared(rule) if is_association => {
                let (Some(head), Some(key), Some(value)) =
                    (rule.head(), rule.rule_key(), rule.rule_value())
                else {
                    return Err(self.not_found(path));
                };
                let Some(child) = self.registry.resolve(&Slot::Shared(value.clone())) else {
                    return Err(self.not_found(path));
                };
                self.registry.get_mut(id).slots[current - 1] = Slot::RuleValue {
                    head: head.clone(),
                    key: key.clone(),
                    value: child,
                };
                child
            }
            shared => {
                let Some(child) = self.registry.resolve(&shared) else {
                    return Err(self.not_found(path));
                };
                self.registry.get_mut(id).slots[current - 1] = Slot::Draft(child);
                child
            }
        };
        self.descend(next, path, depth + 1)
    }

    // ── Terminal edits ────────────────────────────────────────────────────

    fn insert_element(
        &mut self,
        id: DraftId,
        index: i64,
        original: usize,
        current: usize,
        value: &Expr,
    ) -> Result<(), EditError> {
        let draft = self.registry.get(id);
        if draft.is_association() {
            let original_len = draft.ledger.original_len(draft.slots.len(), LedgerMode::Insert);
            // Only an empty association accepts a rule past its end.
            if original > original_len && original_len > 0 {
                return Err(self.cannot_insert(index, id));
            }
            let rules = self.check_rules(value, id)?;
            self.splice_rules(id, current, original, rules);
            return Ok(());
        }

        // An empty list is inserted as an element.
        let splice = self.options.splice_lists && value.is_list() && !value.args().is_empty();
        let elements = if splice {
            value.args().to_vec()
        } else {
            vec![value.clone()]
        };
        let draft = self.registry.get_mut(id);
        for (offset, element) in elements.into_iter().enumerate() {
            draft.slots.insert(current - 1 + offset, Slot::Shared(element));
            draft.ledger.record(original);
        }
        Ok(())
    }

    /// Splices `rules` in front of slot `at`.
    ///
    /// A rule whose key is already present replaces that rule in place and
    /// takes no ledger slot.
    fn splice_rules(&mut self, id: DraftId, at: usize, original: usize, rules: Vec<Expr>) {
        let draft = self.registry.get_mut(id);
        let mut at = at;
        for rule in rules {
            match rule.rule_key().and_then(|key| draft.rule_position(key)) {
                Some(existing) => {
                    trace!("replacing rule at {existing} with {rule}");
                    draft.slots[existing - 1] = Slot::Shared(rule);
                }
                None => {
                    draft.slots.insert(at - 1, Slot::Shared(rule));
                    draft.ledger.record(original);
                    at += 1;
                }
            }
        }
    }

    fn remove_slot(&mut self, id: DraftId, current: usize, original: usize) {
        let draft = self.registry.get_mut(id);
        draft.slots.remove(current - 1);
        draft.ledger.record(original);
    }

    /// The rules `value` contributes to an association.
    fn check_rules(&self, value: &Expr, id: DraftId) -> Result<Vec<Expr>, EditError> {
        if value.is_rule() {
            Ok(vec![value.clone()])
        } else if value.is_list_of_rules() {
            Ok(value.args().to_vec())
        } else {
            Err(EditError::NotRule {
                value: value.clone(),
                target: self.registry.get(id).origin.clone(),
            })
        }
    }

    // ── Errors ────────────────────────────────────────────────────────────

    fn not_found(&self, path: &[Step]) -> EditError {
        EditError::PartNotFound {
            path: path.to_vec(),
            tree: self.tree.clone(),
        }
    }

    fn empty_position(&self) -> EditError {
        EditError::EmptyPosition {
            operation: self.edit.name(),
            tree: self.tree.clone(),
        }
    }

    fn cannot_insert(&self, index: i64, id: DraftId) -> EditError {
        EditError::CannotInsert {
            index,
            target: self.registry.get(id).origin.clone(),
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

fn run_batch(mut editor: Editor<'_>, positions: &[Path]) -> Result<Expr, EditError> {
    editor.apply_all(positions)?;
    debug!("{} batch drafted {} nodes", editor.edit.name(), editor.draft_count());
    Ok(editor.finish())
}

/// Inserts `value` at `path`.
///
/// An empty path returns `tree` itself.
///
/// ```
/// use symtree::insert_at;
/// use symtree_expr::Expr;
/// use symtree_position::Step;
///
/// let tree = Expr::list(vec![Expr::symbol("a"), Expr::symbol("b")]);
/// let out = insert_at(&tree, &Expr::symbol("x"), &[Step::Index(-1)]).unwrap();
/// assert_eq!(out.to_string(), "{a, b, x}");
/// ```
pub fn insert_at(tree: &Expr, value: &Expr, path: &[Step]) -> Result<Expr, EditError> {
    insert_at_with(tree, value, path, &EditOptions::default())
}

pub fn insert_at_with(
    tree: &Expr,
    value: &Expr,
    path: &[Step],
    options: &EditOptions,
) -> Result<Expr, EditError> {
    let mut editor = Editor::insert(tree, value).with_options(options.clone());
    editor.apply(path)?;
    Ok(editor.finish())
}

/// Inserts `value` at every path of `positions`, in order.
///
/// Fails before touching any node if a path is empty.
pub fn insert_at_all(tree: &Expr, value: &Expr, positions: &[Path]) -> Result<Expr, EditError> {
    insert_at_all_with(tree, value, positions, &EditOptions::default())
}

pub fn insert_at_all_with(
    tree: &Expr,
    value: &Expr,
    positions: &[Path],
    options: &EditOptions,
) -> Result<Expr, EditError> {
    run_batch(Editor::insert(tree, value).with_options(options.clone()), positions)
}

/// Removes the element at `path`.
pub fn delete_at(tree: &Expr, path: &[Step]) -> Result<Expr, EditError> {
    delete_at_with(tree, path, &EditOptions::default())
}

pub fn delete_at_with(
    tree: &Expr,
    path: &[Step],
    options: &EditOptions,
) -> Result<Expr, EditError> {
    let mut editor = Editor::delete(tree).with_options(options.clone());
    editor.apply(path)?;
    Ok(editor.finish())
}

/// Removes the element at every path of `positions`.
///
/// Indices refer to the original tree, so `[[1], [2]]` removes the first two
/// elements. An element named twice is removed once.
pub fn delete_at_all(tree: &Expr, positions: &[Path]) -> Result<Expr, EditError> {
    delete_at_all_with(tree, positions, &EditOptions::default())
}

pub fn delete_at_all_with(
    tree: &Expr,
    positions: &[Path],
    options: &EditOptions,
) -> Result<Expr, EditError> {
    run_batch(Editor::delete(tree).with_options(options.clone()), positions)
}

/// `Insert[tree, value, position]`: one path or a batch.
pub fn insert(tree: &Expr, value: &Expr, position: &PositionSpec) -> Result<Expr, EditError> {
    insert_with(tree, value, position, &EditOptions::default())
}

pub fn insert_with(
    tree: &Expr,
    value: &Expr,
    position: &PositionSpec,
    options: &EditOptions,
) -> Result<Expr, EditError> {
    match position {
        PositionSpec::Single(path) => insert_at_with(tree, value, path, options),
        PositionSpec::Many(paths) => insert_at_all_with(tree, value, paths, options),
    }
}

/// `Delete[tree, position]`: one path or a batch.
pub fn delete(tree: &Expr, position: &PositionSpec) -> Result<Expr, EditError> {
    delete_with(tree, position, &EditOptions::default())
}

pub fn delete_with(
    tree: &Expr,
    position: &PositionSpec,
    options: &EditOptions,
) -> Result<Expr, EditError> {
    match position {
        PositionSpec::Single(path) => delete_at_with(tree, path, options),
        PositionSpec::Many(paths) => delete_at_all_with(tree, paths, options),
    }
}
