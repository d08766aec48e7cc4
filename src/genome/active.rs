//! Active-TE bookkeeping: id → span.
//!
//! Spans are logical offsets. Every insertion must be reported through
//! [`ActiveSet::shift_for_insert`] so recorded starts keep matching the
//! sequence.

use std::collections::BTreeMap;

use crate::types::{Span, TeId};

/// Spans of the currently active TEs, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    spans: BTreeMap<TeId, Span>,
}

impl ActiveSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active TEs
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if no TE is active
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Check if `te` is active
    #[inline]
    pub fn contains(&self, te: TeId) -> bool {
        self.spans.contains_key(&te)
    }

    /// Span of `te`, if active
    #[inline]
    pub fn get(&self, te: TeId) -> Option<Span> {
        self.spans.get(&te).copied()
    }

    /// Record a new active TE.
    ///
    /// # Panics
    ///
    /// Panics if `te` is already active. Debug builds also reject a span
    /// overlapping another active run.
    pub fn insert(&mut self, te: TeId, span: Span) {
        debug_assert!(
            self.spans.values().all(|other| !other.overlaps(&span)),
            "span {span:?} of TE {te} overlaps an active run"
        );
        let previous = self.spans.insert(te, span);
        assert!(previous.is_none(), "TE {te} is already active");
    }

    /// Forget `te`, returning its last span
    #[inline]
    pub fn remove(&mut self, te: TeId) -> Option<Span> {
        self.spans.remove(&te)
    }

    /// Move every run starting at or after `pos` right by `inserted`
    pub fn shift_for_insert(&mut self, pos: usize, inserted: usize) {
        for span in self.spans.values_mut() {
            span.shift_for_insert(pos, inserted);
        }
    }

    /// Active TE whose run covers `pos`, if any
    pub fn find_containing(&self, pos: usize) -> Option<TeId> {
        self.spans
            .iter()
            .find(|(_, span)| span.contains(pos))
            .map(|(&te, _)| te)
    }

    /// Active ids in ascending order
    pub fn ids(&self) -> Vec<TeId> {
        self.spans.keys().copied().collect()
    }

    /// Iterate `(id, span)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (TeId, Span)> + '_ {
        self.spans.iter().map(|(&te, &span)| (te, span))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
