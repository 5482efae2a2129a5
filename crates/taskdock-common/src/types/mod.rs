mod core;
mod state;

pub use self::core::*;
pub use state::*;
