//! The dock's persistence and notification seams, implemented for the
//! binary.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use taskdock_common::Result;
use taskdock_config::{save_config_to_path, DockConfig, LauncherConfig};
use taskdock_core::{AppKey, DockObserver, DockStore, LauncherOverride};
use tracing::{debug, info};

/// Writes pins and launcher overrides back into the config file. Clones
/// share one config, so the event loop can swap in a reloaded file while
/// the dock owns another handle.
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Rc<RefCell<DockConfig>>,
}

impl ConfigStore {
    pub fn new(path: PathBuf, config: DockConfig) -> Self {
        Self {
            path,
            config: Rc::new(RefCell::new(config)),
        }
    }

    /// Pick up a reloaded file so later saves do not undo the user's edits.
    pub fn replace_config(&self, config: DockConfig) {
        *self.config.borrow_mut() = config;
    }

    fn save(&self) -> Result<()> {
        save_config_to_path(&self.config.borrow(), &self.path)?;
        Ok(())
    }
}

impl DockStore for ConfigStore {
    fn save_pinned(&mut self, pinned: &[String]) -> Result<()> {
        self.config.borrow_mut().pinned.apps = pinned.to_vec();
        info!(count = pinned.len(), "saving pinned applications");
        self.save()
    }

    fn save_overrides(&mut self, overrides: &[LauncherOverride]) -> Result<()> {
        self.config.borrow_mut().launchers = overrides
            .iter()
            .map(|o| LauncherConfig {
                identity: o.identity.clone(),
                path: o.path.clone(),
            })
            .collect();
        info!(count = overrides.len(), "saving launcher overrides");
        self.save()
    }
}

/// Stands in for a rendering layer; logs what it would redraw.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl DockObserver for LoggingObserver {
    fn groups_changed(&mut self) {
        debug!("groups changed");
    }

    fn group_style_changed(&mut self, app: &AppKey) {
        debug!(app = %app, "group style changed");
    }
}
