//! Circular doubly-linked list primitive.
//!
//! ## Architecture
//!
//! The ring is a circular doubly-linked list whose nodes live in a
//! [`slab::Slab`] arena:
//!
//! - **Slab-based storage**: O(1) node allocation, removal and lookup
//! - **Index links**: `prev`/`next` are slab keys, never references
//! - **Sentinel head**: a value-less link that is both the beginning and
//!   the end of the list, so insertion never has an empty-list special case
//!
//! ## Components
//!
//! - [`Link`]: One node with its value and neighbour keys
//! - [`Ring`]: The list itself, owning every link
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert before/after a key | O(1) |
//! | Remove by key | O(1) |
//! | Locate offset | O(min(i, n - i)) |
//! | Iterate | O(n) |
//!
//! ## Example
//!
//! ```
//! use te_genome::ring::Ring;
//!
//! let mut ring: Ring<char> = "abc".chars().collect();
//! let b = ring.key_at(1).unwrap();
//! ring.insert_before(b, 'X');
//!
//! assert_eq!(ring.iter().collect::<String>(), "aXbc");
//! assert_eq!(ring.len(), 4);
//! ```

pub mod node;
pub mod list;

pub use node::Link;
pub use list::{Ring, Iter};
