//! Circular doubly-linked list over a slab arena.
//!
//! ## Ring Structure
//!
//! ```text
//!   +--> head <-> v0 <-> v1 <-> ... <-> v(n-1) <--+
//!   |    (sentinel)                               |
//!   +---------------------------------------------+
//! ```
//!
//! - `head.next` is the first value, `head.prev` the last
//! - Appending means inserting before the head
//! - Offset `i` is `i + 1` steps forward or `n - i` steps backward from head
//!
//! Every traversal is bounded by the known length, so a corrupted ring can
//! never loop forever.

use slab::Slab;

use crate::ring::Link;

/// Circular doubly-linked list with a sentinel head.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    /// Arena holding every link, the sentinel included
    links: Slab<Link<T>>,

    /// Slab key of the sentinel
    head: usize,

    /// Number of value links (sentinel excluded)
    len: usize,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ring<T> {
    /// Create an empty ring holding only its sentinel
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a ring with room for `capacity` values before reallocating
    ///
    /// # Example
    ///
    /// ```
    /// use te_genome::ring::Ring;
    ///
    /// let ring: Ring<u8> = Ring::with_capacity(1_000);
    /// assert!(ring.capacity() >= 1_000);
    /// assert!(ring.is_empty());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the slab cannot allocate `capacity` links
    pub fn with_capacity(capacity: usize) -> Self {
        let mut links = Slab::with_capacity(capacity.saturating_add(1));
        let entry = links.vacant_entry();
        let head = entry.key();
        entry.insert(Link::sentinel(head));

        Self { links, head, len: 0 }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of values in the ring
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the ring holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of values that fit without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.links.capacity().saturating_sub(1)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Slab key of the sentinel head
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Check if `key` is the sentinel
    #[inline]
    pub fn is_head(&self, key: usize) -> bool {
        key == self.head
    }

    /// Key of the first value, or None if empty
    #[inline]
    pub fn first(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.next(self.head))
    }

    /// Key of the last value, or None if empty
    #[inline]
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.prev(self.head))
    }

    /// Key following `key`
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    #[inline]
    pub fn next(&self, key: usize) -> usize {
        self.link(key).next
    }

    /// Key preceding `key`
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    #[inline]
    pub fn prev(&self, key: usize) -> usize {
        self.link(key).prev
    }

    /// Follow `steps` links from `key`, forward or backward.
    ///
    /// The sentinel is counted like any other link.
    pub fn walk(&self, mut key: usize, steps: usize, forward: bool) -> usize {
        for _ in 0..steps {
            key = if forward { self.next(key) } else { self.prev(key) };
        }
        key
    }

    /// Key of the link at offset `pos`, with `pos == len()` meaning the head.
    ///
    /// Walks from the head in whichever direction is shorter.
    ///
    /// # Returns
    ///
    /// None if `pos > len()`
    pub fn cursor_at(&self, pos: usize) -> Option<usize> {
        if pos > self.len {
            return None;
        }

        let forward_steps = pos + 1;
        let backward_steps = self.len - pos;

        let key = if forward_steps <= backward_steps {
            self.walk(self.head, forward_steps, true)
        } else {
            self.walk(self.head, backward_steps, false)
        };
        Some(key)
    }

    /// Key of the value at offset `index`, or None if out of range
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.cursor_at(index)
    }

    // ========================================================================
    // Value Access
    // ========================================================================

    /// Value stored under `key` (None for the sentinel or a stale key)
    #[inline]
    pub fn get(&self, key: usize) -> Option<&T> {
        self.links.get(key).and_then(|link| link.value.as_ref())
    }

    /// Mutable value stored under `key` (None for the sentinel or a stale key)
    #[inline]
    pub fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.links.get_mut(key).and_then(|link| link.value.as_mut())
    }

    // ========================================================================
    // Splicing
    // ========================================================================

    /// Insert `value` right after `key`
    ///
    /// # Returns
    ///
    /// The slab key of the new link
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn insert_after(&mut self, key: usize, value: T) -> usize {
        let next = self.next(key);
        self.splice_between(key, next, value)
    }

    /// Insert `value` right before `key`
    ///
    /// Inserting before the head appends at the end of the ring.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn insert_before(&mut self, key: usize, value: T) -> usize {
        let prev = self.prev(key);
        self.splice_between(prev, key, value)
    }

    /// Append `value` at the end
    #[inline]
    pub fn push_back(&mut self, value: T) -> usize {
        self.insert_before(self.head, value)
    }

    /// Prepend `value` at the start
    #[inline]
    pub fn push_front(&mut self, value: T) -> usize {
        self.insert_after(self.head, value)
    }

    /// Unlink and drop the link under `key`, returning its value
    ///
    /// # Panics
    ///
    /// Panics if `key` is the sentinel or doesn't exist in the slab
    pub fn remove(&mut self, key: usize) -> T {
        assert!(!self.is_head(key), "cannot remove the ring sentinel");

        let link = self.links.remove(key);
        self.link_mut(link.prev).next = link.next;
        self.link_mut(link.next).prev = link.prev;
        self.len -= 1;

        link.value.expect("value link without a value")
    }

    /// Drop every value, keeping the sentinel
    pub fn clear(&mut self) {
        self.links.retain(|_, link| link.is_sentinel());
        let head_key = self.head;
        let head = self.link_mut(head_key);
        head.prev = head_key;
        head.next = head_key;
        self.len = 0;
    }

    /// Iterate values front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            key: self.next(self.head),
            remaining: self.len,
        }
    }

    /// Walk the whole ring and confirm the links agree in both directions.
    ///
    /// Visits at most `len() + 1` links.
    pub fn is_consistent(&self) -> bool {
        let mut key = self.head;
        for _ in 0..=self.len {
            let next = self.next(key);
            if self.prev(next) != key {
                return false;
            }
            key = next;
        }
        key == self.head && self.links.len() == self.len + 1
    }

    fn splice_between(&mut self, prev: usize, next: usize, value: T) -> usize {
        debug_assert_eq!(self.next(prev), next, "splice points are not adjacent");

        let key = self.links.insert(Link::new(value, prev, next));
        self.link_mut(prev).next = key;
        self.link_mut(next).prev = key;
        self.len += 1;
        key
    }

    #[inline]
    fn link(&self, key: usize) -> &Link<T> {
        self.links.get(key).expect("Invalid ring key")
    }

    #[inline]
    fn link_mut(&mut self, key: usize) -> &mut Link<T> {
        self.links.get_mut(key).expect("Invalid ring key")
    }
}

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Ring::with_capacity(iter.size_hint().0);
        for value in iter {
            ring.push_back(value);
        }
        ring
    }
}

/// Front-to-back iterator over ring values.
#[derive(Debug)]
pub struct Iter<'a, T> {
    ring: &'a Ring<T>,
    key: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.ring.get(self.key).expect("ring walked onto its sentinel");
        self.key = self.ring.next(self.key);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
