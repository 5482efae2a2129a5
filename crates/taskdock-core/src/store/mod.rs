//! Insertion-ordered keyed storage with O(1) reordering.

mod operations;
mod types;

pub use types::*;
