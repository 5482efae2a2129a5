//! Change signals for the application directories.

mod directory_watcher;


pub use directory_watcher::DirectoryWatcher;
