pub mod desktop;
pub mod paths;
pub mod watcher;

pub use desktop::{parse_desktop_entry, XdgDirectory};
pub use paths::application_dirs;
pub use watcher::DirectoryWatcher;
