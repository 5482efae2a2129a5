//! Desktop entries: the `.desktop` parser, the `Exec` command line, and
//! the XDG-backed [`ApplicationDirectory`](taskdock_core::ApplicationDirectory).

mod directory;
mod exec;
mod parser;

pub use directory::XdgDirectory;
pub use exec::command_line;
pub use parser::{parse_desktop_entry, DesktopEntry};
