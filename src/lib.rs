//! # te-genome
//!
//! A circular genome model for transposable-element (TE) insertion,
//! duplication and deactivation.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Core data structures (TeId, Span, Site, GenomeError)
//! - **Ring**: Circular doubly-linked list with slab-based storage
//! - **Genome**: The genome contract and its two realizations
//! - **Simulation**: Seeded amplification workloads over any realization
//!
//! ## Design Principles
//!
//! 1. **One contract, two backends**: contiguous buffer (O(n) shifts) and
//!    linked ring (O(1) local splice once positioned)
//! 2. **Determinism**: Identical call sequences give identical ids and
//!    renderings on either backend
//! 3. **Index links**: Ring nodes point at slab keys, never at each other
//! 4. **Synchronous Execution**: No internal locking; one owner per genome
//!
//! ## Example
//!
//! ```
//! use te_genome::{Genome, GenomeKind};
//!
//! for kind in GenomeKind::ALL {
//!     let mut genome = kind.build(5);
//!     let te = genome.insert_te(2, 2).unwrap();
//!     let copy = genome.copy_te(te, -2).unwrap();
//!
//!     assert_eq!((te, copy), (1, 2));
//!     assert_eq!(genome.render(), "AA--AA---");
//! }
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: TeId, Span, Site, GenomeError
pub mod types;

/// Circular doubly-linked list with slab-based storage
pub mod ring;

/// Genome contract and realizations
pub mod genome;

/// Seeded workload driver
pub mod simulation;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{GenomeError, Site, Span, TeId, TeRecord};
pub use ring::{Link, Ring};
pub use genome::{ActiveSet, ContiguousGenome, Genome, GenomeKind, LinkedGenome};
pub use simulation::{simulate, Simulation, SimulationConfig, SimulationReport};
