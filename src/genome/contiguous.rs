//! Contiguous-buffer genome.
//!
//! ## Design
//!
//! Sites live in one `Vec<Site>`. Inserting splices the new run into the
//! vector and shifts every later site right, so each insertion costs
//! O(len). Spans are not stored: an active TE's start is found by scanning
//! for its first site, which is always correct because runs never fragment.
//!
//! ```text
//! index:  0   1   2   3   4   5   6
//! sites: [-] [-] [1] [1] [-] [-] [-]     active = {1: length 2}
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::iter;

use tracing::{debug, trace};

use crate::genome::{reserve_for, wrap_offset, Genome};
use crate::types::{GenomeError, Site, Span, TeId};

/// Array-backed realization of [`Genome`].
#[derive(Debug, Clone)]
pub struct ContiguousGenome {
    /// One entry per site, in circular order from offset 0
    sites: Vec<Site>,

    /// Active TE id to run length
    active: BTreeMap<TeId, usize>,

    /// Next TE id (for auto-assignment)
    next_id: TeId,
}

impl ContiguousGenome {
    /// Create a genome of `n` empty sites
    ///
    /// # Example
    ///
    /// ```
    /// use te_genome::genome::{ContiguousGenome, Genome};
    ///
    /// let genome = ContiguousGenome::new(5);
    /// assert_eq!(genome.render(), "-----");
    /// ```
    pub fn new(n: usize) -> Self {
        Self::with_capacity(n, n)
    }

    /// Create a genome of `n` empty sites with room for `capacity` sites
    ///
    /// The reservation is clamped by [`reserve_for`]
    pub fn with_capacity(n: usize, capacity: usize) -> Self {
        let mut sites = Vec::with_capacity(reserve_for(n, capacity));
        sites.resize(n, Site::Empty);

        Self {
            sites,
            active: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Read-only view of the sites
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get the next TE id and increment the counter
    #[inline]
    fn allocate_id(&mut self) -> TeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Offset of the first site carrying `te`
    fn find_start(&self, te: TeId) -> Option<usize> {
        self.sites.iter().position(|site| site.is_active_te(te))
    }

    /// Collision check, id allocation and splice for an already validated
    /// position and length.
    fn splice_te(&mut self, pos: usize, length: usize) -> TeId {
        if let Some(victim) = self.sites.get(pos).and_then(|site| site.active_id()) {
            debug!(te = victim, pos, "insertion collides with active element");
            self.disable_te(victim);
        }

        let id = self.allocate_id();
        self.sites
            .splice(pos..pos, iter::repeat(Site::Active(id)).take(length));
        self.active.insert(id, length);

        debug!(id, pos, length, len = self.sites.len(), "inserted transposable element");
        id
    }
}

impl Genome for ContiguousGenome {
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId, GenomeError> {
        GenomeError::check_length(length)?;
        GenomeError::check_position(pos, self.sites.len())?;
        Ok(self.splice_te(pos, length))
    }

    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId> {
        let length = *self.active.get(&te)?;
        let start = self
            .find_start(te)
            .expect("active element has no sites in the buffer");

        let target = wrap_offset(start, offset, self.sites.len());
        trace!(te, start, offset, target, "copying transposable element");
        Some(self.splice_te(target, length))
    }

    fn disable_te(&mut self, te: TeId) {
        let Some(length) = self.active.remove(&te) else {
            return;
        };
        let start = self
            .find_start(te)
            .expect("active element has no sites in the buffer");

        for site in &mut self.sites[start..start + length] {
            assert!(site.is_active_te(te), "run of TE {te} is fragmented");
            *site = Site::Disabled;
        }
        debug!(te, start, length, "disabled transposable element");
    }

    fn active_tes(&self) -> Vec<TeId> {
        self.active.keys().copied().collect()
    }

    fn span_of(&self, te: TeId) -> Option<Span> {
        let length = *self.active.get(&te)?;
        let start = self
            .find_start(te)
            .expect("active element has no sites in the buffer");
        Some(Span::new(start, length))
    }

    fn len(&self) -> usize {
        self.sites.len()
    }

    fn te_count(&self) -> u64 {
        self.next_id - 1
    }

    fn render(&self) -> String {
        self.sites.iter().map(|site| site.symbol()).collect()
    }

    fn check_invariants(&self) {
        let mut tagged: BTreeMap<TeId, usize> = BTreeMap::new();
        for site in &self.sites {
            if let Some(te) = site.active_id() {
                *tagged.entry(te).or_default() += 1;
            }
        }
        assert_eq!(tagged, self.active, "site tags disagree with the active set");

        for (&te, &length) in &self.active {
            let start = self.find_start(te).expect("active element has no sites");
            assert!(
                self.sites[start..start + length]
                    .iter()
                    .all(|site| site.is_active_te(te)),
                "run of TE {te} is not contiguous"
            );
        }
        assert!(self.next_id > self.active.keys().last().copied().unwrap_or(0));
    }
}

impl fmt::Display for ContiguousGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
