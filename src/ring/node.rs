//! Link node for slab-based storage.
//!
//! ## Design
//!
//! `Link` wraps a value with doubly-linked list pointers. The pointers are
//! slab keys (`usize`), so a link can be spliced in or out in O(1) when we
//! have its key.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! ## Circularity
//!
//! Unlike an open queue, every link in a ring always has both neighbours.
//! A lone sentinel points at itself in both directions.

/// Link stored in the slab.
///
/// `value` is `None` only for the sentinel head of a [`Ring`](crate::ring::Ring).
#[derive(Debug, Clone)]
pub struct Link<T> {
    /// Payload (None for the sentinel)
    pub value: Option<T>,

    /// Previous link in the ring (slab key)
    pub prev: usize,

    /// Next link in the ring (slab key)
    pub next: usize,
}

impl<T> Link<T> {
    /// Create a new link carrying `value` between `prev` and `next`
    #[inline]
    pub fn new(value: T, prev: usize, next: usize) -> Self {
        Self {
            value: Some(value),
            prev,
            next,
        }
    }

    /// Create a sentinel that links to itself
    ///
    /// # Arguments
    ///
    /// * `key` - The slab key the sentinel will be stored under
    #[inline]
    pub fn sentinel(key: usize) -> Self {
        Self {
            value: None,
            prev: key,
            next: key,
        }
    }

    /// Check if this is a sentinel link
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.value.is_none()
    }

    /// Check if both neighbours are `key` (a ring of one)
    #[inline]
    pub fn is_self_linked(&self, key: usize) -> bool {
        self.prev == key && self.next == key
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
