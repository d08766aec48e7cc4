//! Linked-node genome.
//!
//! ## Design
//!
//! Each site is a node of a [`Ring`]: a circular doubly-linked list stored
//! in a slab. An [`ActiveSet`] records the span of every active TE as
//! logical offsets, so no node key outlives the call that found it.
//!
//! ## Insertion
//!
//! ```text
//! 1. cursor = node at pos (head sentinel when pos == len)
//! 2. if cursor carries an active TE, tombstone that TE's run
//! 3. shift spans starting at or after pos by length
//! 4. splice `length` new nodes in front of the cursor
//! ```
//!
//! Positioning walks from the head in the shorter direction. Once the
//! cursor is found the splice costs O(length), independent of genome size,
//! which suits workloads of many small insertions into a large genome.

use std::fmt;

use tracing::{debug, trace};

use crate::genome::{reserve_for, wrap_offset, ActiveSet, Genome};
use crate::ring::Ring;
use crate::types::{GenomeError, Site, Span, TeId};

/// Node-backed realization of [`Genome`].
#[derive(Debug, Clone)]
pub struct LinkedGenome {
    /// One node per site, in circular order from offset 0
    ring: Ring<Site>,

    /// Spans of the active TEs
    active: ActiveSet,

    /// Next TE id (for auto-assignment)
    next_id: TeId,
}

impl LinkedGenome {
    /// Create a genome of `n` empty sites
    ///
    /// # Example
    ///
    /// ```
    /// use te_genome::genome::{Genome, LinkedGenome};
    ///
    /// let mut genome = LinkedGenome::new(4);
    /// genome.insert_te(4, 2).unwrap();
    /// assert_eq!(genome.render(), "----AA");
    /// ```
    pub fn new(n: usize) -> Self {
        Self::with_capacity(n, n)
    }

    /// Create a genome of `n` empty sites with room for `capacity` sites
    ///
    /// The reservation is clamped by [`reserve_for`]
    pub fn with_capacity(n: usize, capacity: usize) -> Self {
        let mut ring = Ring::with_capacity(reserve_for(n, capacity));
        for _ in 0..n {
            ring.push_back(Site::Empty);
        }

        Self {
            ring,
            active: ActiveSet::new(),
            next_id: 1,
        }
    }

    /// Read-only view of the active spans
    #[inline]
    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    /// Get the next TE id and increment the counter
    #[inline]
    fn allocate_id(&mut self) -> TeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Retag `length` nodes from `start_key` onwards as disabled.
    ///
    /// # Panics
    ///
    /// Panics if a node on the way does not belong to `te`
    fn tombstone(&mut self, te: TeId, start_key: usize, length: usize) {
        let mut key = start_key;
        for _ in 0..length {
            let site = self
                .ring
                .get_mut(key)
                .expect("run of an active element crosses the seam");
            assert!(site.is_active_te(te), "run of TE {te} is fragmented");
            *site = Site::Disabled;
            key = self.ring.next(key);
        }
    }

    /// Collision check, id allocation and splice for an already validated
    /// position and length.
    fn splice_te(&mut self, pos: usize, length: usize) -> TeId {
        let cursor = self
            .ring
            .cursor_at(pos)
            .expect("insert position was validated");

        if let Some(victim) = self.ring.get(cursor).and_then(|site| site.active_id()) {
            let span = self
                .active
                .remove(victim)
                .expect("node tagged with an inactive element");
            debug!(te = victim, pos, "insertion collides with active element");

            // The cursor sits inside the victim's run; walk back to its start
            let start_key = self.ring.walk(cursor, pos - span.start, false);
            self.tombstone(victim, start_key, span.length);
            debug!(te = victim, start = span.start, length = span.length, "disabled transposable element");
        }

        let id = self.allocate_id();
        self.active.shift_for_insert(pos, length);
        for _ in 0..length {
            self.ring.insert_before(cursor, Site::Active(id));
        }
        self.active.insert(id, Span::new(pos, length));

        debug!(id, pos, length, len = self.ring.len(), "inserted transposable element");
        id
    }
}

impl Genome for LinkedGenome {
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId, GenomeError> {
        GenomeError::check_length(length)?;
        GenomeError::check_position(pos, self.ring.len())?;
        Ok(self.splice_te(pos, length))
    }

    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId> {
        let span = self.active.get(te)?;
        let target = wrap_offset(span.start, offset, self.ring.len());
        trace!(te, start = span.start, offset, target, "copying transposable element");
        Some(self.splice_te(target, span.length))
    }

    fn disable_te(&mut self, te: TeId) {
        let Some(span) = self.active.remove(te) else {
            return;
        };
        let start_key = self
            .ring
            .key_at(span.start)
            .expect("active span starts past the end of the genome");

        self.tombstone(te, start_key, span.length);
        debug!(te, start = span.start, length = span.length, "disabled transposable element");
    }

    fn active_tes(&self) -> Vec<TeId> {
        self.active.ids()
    }

    fn span_of(&self, te: TeId) -> Option<Span> {
        self.active.get(te)
    }

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn te_count(&self) -> u64 {
        self.next_id - 1
    }

    fn render(&self) -> String {
        self.ring.iter().map(|site| site.symbol()).collect()
    }

    fn check_invariants(&self) {
        assert!(self.ring.is_consistent(), "ring links are corrupted");

        let sites: Vec<Site> = self.ring.iter().copied().collect();
        let mut tagged = 0;
        for (te, span) in self.active.iter() {
            assert!(span.end() <= sites.len(), "span of TE {te} runs past the seam");
            assert!(
                sites[span.start..span.end()]
                    .iter()
                    .all(|site| site.is_active_te(te)),
                "span of TE {te} disagrees with its sites"
            );
            assert!(te < self.next_id, "TE {te} was never issued");
            tagged += span.length;
        }

        let active_sites = sites.iter().filter(|site| site.active_id().is_some()).count();
        assert_eq!(active_sites, tagged, "active sites outside any recorded span");
    }
}

impl fmt::Display for LinkedGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
