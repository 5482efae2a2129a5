//! The synchronization layer: keeps groups, bindings and the recency list
//! consistent with the provider's event stream.

mod batch;
mod commands;
mod events;
mod sync;
mod types;

pub use types::*;

#[cfg(test)]
mod tests;
