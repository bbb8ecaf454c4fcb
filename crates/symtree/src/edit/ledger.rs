//! Per-draft bookkeeping of original indices touched by the current batch.
//!
//! Callers address children by their index in the *original* node. Once a
//! batch has inserted into (or removed from) a draft, the draft's numbering
//! drifts away from the original one; the ledger translates between the two.

/// What the marks in a ledger stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LedgerMode {
    /// Marks are original indices in front of which an element was inserted.
    Insert,
    /// Marks are original indices whose element was removed.
    Remove,
}

/// Sorted multiset of original 1-based indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct IndexLedger {
    marks: Vec<usize>,
}

impl IndexLedger {
    pub(crate) fn record(&mut self, original: usize) {
        let at = self.count_le(original);
        self.marks.insert(at, original);
    }

    pub(crate) fn contains(&self, original: usize) -> bool {
        self.marks.binary_search(&original).is_ok()
    }

    fn count_le(&self, original: usize) -> usize {
        self.marks.partition_point(|&m| m <= original)
    }

    fn count_lt(&self, original: usize) -> usize {
        self.marks.partition_point(|&m| m < original)
    }

    /// Length of the original node given the draft's current length.
    pub(crate) fn original_len(&self, current_len: usize, mode: LedgerMode) -> usize {
        match mode {
            LedgerMode::Insert => current_len.saturating_sub(self.marks.len()),
            LedgerMode::Remove => current_len + self.marks.len(),
        }
    }

    /// Current 1-based index of the slot the caller means by `original`.
    ///
    /// Insert mode: elements already inserted at or before `original` push it
    /// right, so a second insertion at the same original index lands after
    /// the first. Remove mode: `None` when that element is already gone.
    pub(crate) fn to_current(&self, original: usize, mode: LedgerMode) -> Option<usize> {
        match mode {
            LedgerMode::Insert => Some(original + self.count_le(original)),
            LedgerMode::Remove => {
                if self.contains(original) {
                    None
                } else {
                    Some(original - self.count_lt(original))
                }
            }
        }
    }

    /// Original index that owns the current 1-based slot `current`.
    ///
    /// In insert mode an inserted element belongs to the original index it
    /// was inserted in front of.
    pub(crate) fn to_original(&self, current: usize, mode: LedgerMode) -> usize {
        match mode {
            LedgerMode::Insert => (1..=current)
                .find(|&p| p + self.count_le(p) >= current)
                .unwrap_or(current),
            LedgerMode::Remove => {
                let mut kept = 0;
                for p in 1..=current + self.marks.len() {
                    if !self.contains(p) {
                        kept += 1;
                        if kept == current {
                            return p;
                        }
                    }
                }
                current
            }
        }
    }
}
