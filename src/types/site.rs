//! Genome sites.

use std::fmt;

use crate::types::TeId;

/// One site of the circular genome.
///
/// Both realizations store `Site` values; the render character of a site
/// does not depend on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Site {
    /// No TE at this site
    #[default]
    Empty,
    /// Site belongs to the run of an active TE
    Active(TeId),
    /// Tombstone left behind by a disabled TE
    Disabled,
}

impl Site {
    /// Character used by `render()`
    ///
    /// - `-` for empty
    /// - `A` for active
    /// - `x` for disabled
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Site::Empty => '-',
            Site::Active(_) => 'A',
            Site::Disabled => 'x',
        }
    }

    /// Id of the active TE owning this site, if any
    #[inline]
    pub fn active_id(self) -> Option<TeId> {
        match self {
            Site::Active(id) => Some(id),
            _ => None,
        }
    }

    /// Check if this site is part of the given active TE
    #[inline]
    pub fn is_active_te(self, te: TeId) -> bool {
        self == Site::Active(te)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
