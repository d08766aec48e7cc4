//! Transposable element identifiers and spans.

/// Transposable element identifier.
///
/// Ids are issued from 1 upwards and are never reused, even after the
/// element has been disabled.
pub type TeId = u64;

/// A transposable element: its id and the number of sites it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeRecord {
    /// Unique identifier
    pub id: TeId,

    /// Number of sites in the run (always > 0)
    pub length: usize,
}

impl TeRecord {
    /// Create a new TE record
    #[inline]
    pub fn new(id: TeId, length: usize) -> Self {
        Self { id, length }
    }
}

/// Location of an active TE's run: `[start, start + length)`.
///
/// Spans are logical offsets, never node handles, so they stay valid
/// across structural mutation as long as they are shifted on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first site of the run
    pub start: usize,

    /// Number of sites in the run
    pub length: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last offset of the run
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if `pos` falls inside the run
    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Check if two runs share at least one offset
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Account for `inserted` new sites spliced in at `pos`.
    ///
    /// Runs starting at or after `pos` move right; earlier runs stay put.
    #[inline]
    pub fn shift_for_insert(&mut self, pos: usize, inserted: usize) {
        if self.start >= pos {
            self.start += inserted;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = Span::new(2, 3);

        assert_eq!(span.end(), 5);
        assert!(!span.contains(1));
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_span_overlaps() {
        let a = Span::new(2, 3);

        assert!(a.overlaps(&Span::new(4, 1)));
        assert!(a.overlaps(&Span::new(0, 3)));
        assert!(!a.overlaps(&Span::new(5, 2)));
        assert!(!a.overlaps(&Span::new(0, 2)));
    }

    #[test]
    fn test_span_shift_for_insert() {
        let mut at = Span::new(4, 2);
        at.shift_for_insert(4, 3);
        assert_eq!(at.start, 7);

        let mut before = Span::new(1, 2);
        before.shift_for_insert(4, 3);
        assert_eq!(before.start, 1);
    }

    #[test]
    fn test_te_record() {
        let record = TeRecord::new(7, 12);
        assert_eq!(record.id, 7);
        assert_eq!(record.length, 12);
    }
}
