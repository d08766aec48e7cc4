//! Genome contract and its two realizations.
//!
//! ## Design Principles
//!
//! 1. **One contract**: [`Genome`] is the capability set every backend offers
//! 2. **Determinism**: identical call sequences give identical ids and renders
//!    on every backend
//! 3. **Quiet references, loud positions**: unknown or inactive TE ids are
//!    no-ops, out-of-range positions are errors
//!
//! ## Realizations
//!
//! | Backend | Storage | Insert | Locate offset |
//! |---------|---------|--------|---------------|
//! | [`ContiguousGenome`] | `Vec<Site>` | O(n) shift | O(1) |
//! | [`LinkedGenome`] | slab-backed ring | O(length) once positioned | O(min(i, n - i)) |
//!
//! ## Collision Rule
//!
//! Inserting at `pos < len` inspects the single site currently at `pos`.
//! If it belongs to an active TE, that TE is disabled before the new run is
//! spliced in. Appending at `pos == len` has no boundary site and never
//! collides.
//!
//! ## Example
//!
//! ```
//! use te_genome::genome::{Genome, GenomeKind};
//!
//! let mut genome = GenomeKind::Linked.build(5);
//!
//! let first = genome.insert_te(2, 2).unwrap();
//! assert_eq!(genome.render(), "--AA---");
//!
//! let second = genome.insert_te(2, 1).unwrap();
//! assert_eq!((first, second), (1, 2));
//! assert_eq!(genome.render(), "--Axx---");
//! assert_eq!(genome.active_tes(), vec![2]);
//! ```

pub mod active;
pub mod contiguous;
pub mod linked;

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::types::{GenomeError, Span, TeId, TeRecord};

pub use active::ActiveSet;
pub use contiguous::ContiguousGenome;
pub use linked::LinkedGenome;

/// A circular genome carrying transposable elements.
///
/// Offsets are 0-based and counted from logical offset 0. The genome never
/// shrinks: disabling a TE tombstones its sites in place.
pub trait Genome: fmt::Debug {
    /// Insert a fresh active TE of `length` sites before the site at `pos`.
    ///
    /// `pos == len()` appends at the circular seam. If the site at `pos`
    /// belongs to an active TE, that TE is disabled first.
    ///
    /// # Errors
    ///
    /// * [`GenomeError::InvalidLength`] if `length == 0`
    /// * [`GenomeError::PositionOutOfRange`] if `pos > len()`
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId, GenomeError>;

    /// Duplicate active TE `te` at `offset` sites from its current start.
    ///
    /// The target wraps around the circle in both directions. The copy gets
    /// a fresh id and `te`'s length.
    ///
    /// # Returns
    ///
    /// The new id, or None (with no mutation) if `te` is not active
    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId>;

    /// Disable `te`, tombstoning its run. No-op if `te` is not active.
    fn disable_te(&mut self, te: TeId);

    /// Ids of the active TEs in ascending order
    fn active_tes(&self) -> Vec<TeId>;

    /// Current run of an active TE
    fn span_of(&self, te: TeId) -> Option<Span>;

    /// Total number of sites, empty and tombstoned ones included
    fn len(&self) -> usize;

    /// Number of ids issued so far
    fn te_count(&self) -> u64;

    /// Linear snapshot from offset 0: `-` empty, `A` active, `x` disabled
    fn render(&self) -> String;

    /// Panic if the active set disagrees with the site tags.
    ///
    /// This walks the whole genome; it exists for tests and debugging.
    fn check_invariants(&self);

    /// Check if the genome has no sites
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `te` is currently active
    fn is_active(&self, te: TeId) -> bool {
        self.span_of(te).is_some()
    }

    /// Id and length of every active TE, in ascending id order
    fn active_records(&self) -> Vec<TeRecord> {
        self.active_tes()
            .into_iter()
            .filter_map(|te| self.span_of(te).map(|span| TeRecord::new(te, span.length)))
            .collect()
    }

    /// SHA-256 of the rendered genome
    ///
    /// Two genomes with the same state root render identically.
    fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.render().as_bytes());
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the state root as a hex string
    fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}

impl fmt::Display for dyn Genome + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Target offset for copying a run starting at `start` by `offset` sites.
///
/// Uses the Euclidean remainder so negative offsets wrap backwards.
///
/// # Panics
///
/// Panics if `len == 0`
///
/// # Example
///
/// ```
/// use te_genome::genome::wrap_offset;
///
/// assert_eq!(wrap_offset(2, 3, 10), 5);
/// assert_eq!(wrap_offset(2, -3, 10), 9);
/// assert_eq!(wrap_offset(2, 23, 10), 5);
/// ```
pub fn wrap_offset(start: usize, offset: i64, len: usize) -> usize {
    assert!(len > 0, "cannot wrap an offset on an empty genome");
    let target = (start as i128 + offset as i128).rem_euclid(len as i128);
    target as usize
}

/// Most sites a constructor reserves beyond its initial `n`
pub const MAX_RESERVE_HEADROOM: usize = 1 << 16;

/// Capacity actually reserved for a genome of `n` sites asked to hold
/// `capacity`: never below `n`, never more than [`MAX_RESERVE_HEADROOM`]
/// above it. Growth past the reservation reallocates as usual.
#[inline]
pub fn reserve_for(n: usize, capacity: usize) -> usize {
    capacity.clamp(n, n.saturating_add(MAX_RESERVE_HEADROOM))
}

// ============================================================================
// Backend selection
// ============================================================================

/// Backend chosen when a genome is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenomeKind {
    /// [`ContiguousGenome`]
    #[default]
    Contiguous,
    /// [`LinkedGenome`]
    Linked,
}

impl GenomeKind {
    /// Every backend, in a fixed order
    pub const ALL: [GenomeKind; 2] = [GenomeKind::Contiguous, GenomeKind::Linked];

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            GenomeKind::Contiguous => "contiguous",
            GenomeKind::Linked => "linked",
        }
    }

    /// Build an empty genome of `n` sites on this backend
    pub fn build(self, n: usize) -> Box<dyn Genome> {
        self.build_with_capacity(n, n)
    }

    /// Build an empty genome of `n` sites with room for `capacity` sites
    ///
    /// `capacity` is a hint, clamped by [`reserve_for`]
    pub fn build_with_capacity(self, n: usize, capacity: usize) -> Box<dyn Genome> {
        match self {
            GenomeKind::Contiguous => Box::new(ContiguousGenome::with_capacity(n, capacity)),
            GenomeKind::Linked => Box::new(LinkedGenome::with_capacity(n, capacity)),
        }
    }
}

impl fmt::Display for GenomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenomeKind {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contiguous" | "list" | "vec" => Ok(GenomeKind::Contiguous),
            "linked" | "ring" => Ok(GenomeKind::Linked),
            other => Err(GenomeError::UnknownKind(other.to_string())),
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
    fn test_wrap_offset() {
        assert_eq!(wrap_offset(0, 0, 1), 0);
        assert_eq!(wrap_offset(4, 1, 5), 0);
        assert_eq!(wrap_offset(0, -1, 5), 4);
        assert_eq!(wrap_offset(3, -13, 5), 0);
        assert_eq!(wrap_offset(3, i64::MAX, 7), ((3i128 + i64::MAX as i128) % 7) as usize);
    }

    #[test]
    #[should_panic(expected = "empty genome")]
    fn test_wrap_offset_empty_panics() {
        wrap_offset(0, 1, 0);
    }

    #[test]
    fn test_reserve_for() {
        assert_eq!(reserve_for(10, 0), 10);
        assert_eq!(reserve_for(10, 50), 50);
        assert_eq!(reserve_for(10, usize::MAX), 10 + MAX_RESERVE_HEADROOM);
        assert_eq!(reserve_for(usize::MAX, usize::MAX), usize::MAX);
    }

    #[test]
    fn test_build_with_huge_capacity() {
        for kind in GenomeKind::ALL {
            let mut genome = kind.build_with_capacity(4, usize::MAX);
            assert_eq!(genome.render(), "----", "{kind}");

            assert_eq!(genome.insert_te(4, 2), Ok(1), "{kind}");
            assert_eq!(genome.render(), "----AA", "{kind}");
            genome.check_invariants();
        }
    }

    #[test]
    fn test_genome_kind_parse() {
        assert_eq!("linked".parse::<GenomeKind>(), Ok(GenomeKind::Linked));
        assert_eq!(" Contiguous ".parse::<GenomeKind>(), Ok(GenomeKind::Contiguous));
        assert_eq!(
            "tree".parse::<GenomeKind>(),
            Err(GenomeError::UnknownKind("tree".to_string()))
        );
    }

    #[test]
    fn test_genome_kind_display_round_trip() {
        for kind in GenomeKind::ALL {
            assert_eq!(kind.to_string().parse::<GenomeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_genome_kind_build() {
        for kind in GenomeKind::ALL {
            let genome = kind.build(4);
            assert_eq!(genome.len(), 4);
            assert_eq!(genome.to_string(), "----");
            assert_eq!(genome.te_count(), 0);
        }
    }

    #[test]
    fn test_active_records() {
        for kind in GenomeKind::ALL {
            let mut genome = kind.build(3);
            genome.insert_te(0, 2).unwrap();
            genome.insert_te(5, 1).unwrap();
            genome.insert_te(1, 4).unwrap();

            assert_eq!(genome.render(), "xAAAAx---A");
            assert_eq!(
                genome.active_records(),
                vec![TeRecord::new(2, 1), TeRecord::new(3, 4)]
            );
        }
    }

    #[test]
    fn test_state_root_matches_render() {
        let mut a = GenomeKind::Contiguous.build(6);
        let mut b = GenomeKind::Linked.build(6);
        assert_eq!(a.state_root(), b.state_root());

        a.insert_te(1, 2).unwrap();
        assert_ne!(a.state_root(), b.state_root());

        b.insert_te(1, 2).unwrap();
        assert_eq!(a.state_root_hex(), b.state_root_hex());
        assert_eq!(a.state_root_hex().len(), 64);
    }
}
