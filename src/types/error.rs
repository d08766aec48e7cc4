//! Error type for the genome contract.
//!
//! Only out-of-range positions and degenerate lengths are errors. Unknown or
//! already inactive TE ids are answered quietly (`None` or a no-op).

use thiserror::Error;

/// Failures reported by [`Genome`](crate::genome::Genome) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// Insertion position lies outside `[0, len]`
    #[error("position {pos} is out of range for genome of length {len}")]
    PositionOutOfRange {
        /// Requested position
        pos: usize,
        /// Genome length at the time of the call
        len: usize,
    },

    /// A TE must occupy at least one site
    #[error("transposable element length must be positive, got {length}")]
    InvalidLength {
        /// Requested length
        length: usize,
    },

    /// Backend name that does not match any realization
    #[error("unknown genome kind `{0}` (expected `contiguous` or `linked`)")]
    UnknownKind(String),

    /// Simulation parameters that cannot drive a workload
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),
}

impl GenomeError {
    /// Check `pos` against the inclusive range `[0, len]`
    #[inline]
    pub fn check_position(pos: usize, len: usize) -> Result<(), GenomeError> {
        if pos > len {
            return Err(GenomeError::PositionOutOfRange { pos, len });
        }
        Ok(())
    }

    /// Reject zero-length TEs
    #[inline]
    pub fn check_length(length: usize) -> Result<(), GenomeError> {
        if length == 0 {
            return Err(GenomeError::InvalidLength { length });
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_position_bounds() {
        assert!(GenomeError::check_position(0, 0).is_ok());
        assert!(GenomeError::check_position(5, 5).is_ok());
        assert_eq!(
            GenomeError::check_position(6, 5),
            Err(GenomeError::PositionOutOfRange { pos: 6, len: 5 })
        );
    }

    #[test]
    fn test_check_length() {
        assert!(GenomeError::check_length(1).is_ok());
        assert_eq!(
            GenomeError::check_length(0),
            Err(GenomeError::InvalidLength { length: 0 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GenomeError::PositionOutOfRange { pos: 9, len: 4 };
        assert_eq!(err.to_string(), "position 9 is out of range for genome of length 4");

        let err = GenomeError::UnknownKind("tree".to_string());
        assert!(err.to_string().contains("tree"));
    }
}
