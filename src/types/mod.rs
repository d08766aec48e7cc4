//! Core data types for the genome model
//!
//! ## Types
//!
//! - [`TeId`]: Identifier of a transposable element
//! - [`TeRecord`]: A TE's id together with its run length
//! - [`Span`]: Location of an active TE's run inside the genome
//! - [`Site`]: One position of the genome (empty, active or disabled)
//! - [`GenomeError`]: Loud failures of the genome contract
//!
//! ## Offsets
//!
//! All offsets are `usize` positions counted from logical offset 0.
//! Circular arithmetic is done at the point of use with the current length.

mod te;
mod site;
mod error;

// Re-export all types at module level
pub use te::{TeId, TeRecord, Span};
pub use site::Site;
pub use error::GenomeError;
