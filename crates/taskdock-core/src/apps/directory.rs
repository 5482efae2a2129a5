//! The application directory the resolver indexes.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use taskdock_common::DirectoryError;

use super::Application;

/// Source of desktop entries. The dock never scans the filesystem itself;
/// the host hands it one of these.
pub trait ApplicationDirectory {
    /// Every entry currently installed, in lookup-priority order (the first
    /// entry with a given id shadows later ones).
    fn entries(&self) -> Result<Vec<Application>, DirectoryError>;

    /// Load one entry from an explicit path, for user-chosen launchers.
    fn entry_from_path(&self, path: &Path) -> Result<Option<Application>, DirectoryError>;

    /// Start the application, or one of its named actions.
    fn launch(&self, app: &Application, action: Option<&str>) -> Result<(), DirectoryError>;
}

#[derive(Debug, Default)]
struct MemoryDirectoryInner {
    entries: Vec<Application>,
    launched: Vec<(String, Option<String>)>,
}

/// An in-memory directory. Clones share the same entries, so a host (or a
/// test) can keep one handle to edit entries while the dock owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    inner: Rc<RefCell<MemoryDirectoryInner>>,
}

impl MemoryDirectory {
    pub fn new(entries: Vec<Application>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryDirectoryInner {
                entries,
                launched: Vec::new(),
            })),
        }
    }

    pub fn set_entries(&self, entries: Vec<Application>) {
        self.inner.borrow_mut().entries = entries;
    }

    pub fn add_entry(&self, entry: Application) {
        self.inner.borrow_mut().entries.push(entry);
    }

    /// `(application id, action)` pairs passed to `launch`, oldest first.
    pub fn launched(&self) -> Vec<(String, Option<String>)> {
        self.inner.borrow().launched.clone()
    }
}

impl ApplicationDirectory for MemoryDirectory {
    fn entries(&self) -> Result<Vec<Application>, DirectoryError> {
        Ok(self.inner.borrow().entries.clone())
    }

    fn entry_from_path(&self, path: &Path) -> Result<Option<Application>, DirectoryError> {
        Ok(self
            .inner
            .borrow()
            .entries
            .iter()
            .find(|app| app.path.as_deref() == Some(path))
            .cloned())
    }

    fn launch(&self, app: &Application, action: Option<&str>) -> Result<(), DirectoryError> {
        if app.is_placeholder() {
            return Err(DirectoryError::LaunchFailed {
                app: app.name.clone(),
                reason: "no desktop entry".into(),
            });
        }
        self.inner
            .borrow_mut()
            .launched
            .push((app.id.clone(), action.map(str::to_string)));
        Ok(())
    }
}
