//! Application groups: the windows of one application behind one button.

mod operations;
mod types;

pub use types::*;
