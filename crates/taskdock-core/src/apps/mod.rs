//! Applications and how windows are matched to them.
//!
//! The [`AppResolver`] owns the only catalog of [`Application`] records.
//! Everything else in the dock refers to an application by its [`AppKey`].

mod application;
mod directory;
mod identity;
mod resolver;

pub use application::{AppAction, AppKey, Application};
pub use directory::{ApplicationDirectory, MemoryDirectory};
pub use identity::identity_key;
pub use resolver::{AppResolver, LauncherOverride, MatchKind};
