//! The identity-resolution cascade and the indices behind it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::identity::basename;
use super::{AppKey, Application, ApplicationDirectory};

/// Executables that launch other programs; an entry whose `Exec` starts
/// with one of these says nothing about the window it will produce.
const EXCLUDED_BINARIES: &[&str] = &[
    "env", "exo-open", "xfce-open", "xdg-open", "bash", "dash", "ksh", "sh", "tcsh", "zsh",
];

/// Identities that must be remapped before matching so cooperating helper
/// processes of one suite group together.
const IDENTITY_ALIASES: &[(&str, &str)] = &[
    ("xfce4-panel", "panel-preferences"),
    ("wrapper-2.0", "panel-preferences"),
];

/// A user's explicit choice of desktop entry for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherOverride {
    pub identity: String,
    pub path: PathBuf,
}

/// Which step of the cascade produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    WmClass,
    Id,
    Name,
    FirstWordId,
    FirstWordName,
    Override,
    Placeholder,
}

/// Maps window identities to applications.
///
/// Holds the single catalog of application records (desktop entries and
/// placeholders) keyed by [`AppKey`]. Indices are built from the
/// [`ApplicationDirectory`] the first time a lookup needs them, and rebuilt
/// in full after [`AppResolver::invalidate`].
#[derive(Debug, Default)]
pub struct AppResolver {
    catalog: HashMap<AppKey, Application>,
    by_wm_class: HashMap<String, String>,
    by_name: HashMap<String, String>,
    overrides: HashMap<String, String>,
    launcher_overrides: Vec<LauncherOverride>,
    indexed: bool,
}

impl AppResolver {
    pub fn new(launcher_overrides: Vec<LauncherOverride>) -> Self {
        Self {
            launcher_overrides,
            ..Self::default()
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Drop every desktop-entry index. Placeholders stay in the catalog
    /// until the groups using them let go.
    pub fn invalidate(&mut self) {
        self.catalog.retain(|key, _| key.is_placeholder());
        self.by_wm_class.clear();
        self.by_name.clear();
        self.overrides.clear();
        self.indexed = false;
        debug!("application index invalidated");
    }

    pub fn ensure_indexed(&mut self, directory: &dyn ApplicationDirectory) {
        if self.indexed {
            return;
        }
        self.indexed = true;

        match directory.entries() {
            Ok(entries) => {
                for entry in entries {
                    self.index_entry(entry);
                }
            }
            Err(e) => warn!("failed to read application directory: {e}"),
        }

        let overrides = std::mem::take(&mut self.launcher_overrides);
        for launcher in &overrides {
            self.load_override(directory, launcher);
        }
        self.launcher_overrides = overrides;

        debug!(
            entries = self.catalog.len(),
            overrides = self.overrides.len(),
            "application index built"
        );
    }

    /// Resolve an identity to an application key, synthesizing a
    /// placeholder on a miss.
    pub fn resolve(&mut self, identity: &str, directory: &dyn ApplicationDirectory) -> AppKey {
        self.resolve_with_kind(identity, directory).0
    }

    pub fn resolve_with_kind(
        &mut self,
        identity: &str,
        directory: &dyn ApplicationDirectory,
    ) -> (AppKey, MatchKind) {
        self.ensure_indexed(directory);

        let identity = translate(identity.trim().to_lowercase());
        debug!("searching a match for '{identity}'");

        if let Some((id, kind)) = self.lookup(&identity) {
            debug!(identity = %identity, id = %id, ?kind, "application matched");
            return (AppKey::Entry(id), kind);
        }

        debug!("no match for '{identity}', using placeholder");
        let key = AppKey::Unresolved(identity.clone());
        self.catalog
            .entry(key.clone())
            .or_insert_with(|| Application::placeholder(identity));
        (key, MatchKind::Placeholder)
    }

    fn lookup(&self, identity: &str) -> Option<(String, MatchKind)> {
        if let Some(id) = self.by_wm_class.get(identity) {
            return Some((id.clone(), MatchKind::WmClass));
        }
        if let Some(id) = self.entry_id(identity) {
            return Some((id, MatchKind::Id));
        }
        if let Some(id) = self.by_name.get(identity) {
            return Some((id.clone(), MatchKind::Name));
        }

        // Multi-word classes from one vendor ("app manager", "app viewer")
        // group under their first word.
        if let Some((first, _)) = identity.split_once(' ') {
            debug!("no match for whole string, trying first word '{first}'");
            if let Some(id) = self.entry_id(first) {
                return Some((id, MatchKind::FirstWordId));
            }
            if let Some(id) = self.by_name.get(first) {
                return Some((id.clone(), MatchKind::FirstWordName));
            }
        }

        self.overrides
            .get(identity)
            .map(|id| (id.clone(), MatchKind::Override))
    }

    fn entry_id(&self, id: &str) -> Option<String> {
        let key = AppKey::Entry(id.to_string());
        self.catalog.contains_key(&key).then(|| id.to_string())
    }

    /// Record a user's launcher choice for `identity`. Returns the key the
    /// identity now resolves to, or `None` when the entry could not be read.
    pub fn add_override(
        &mut self,
        identity: &str,
        path: &Path,
        directory: &dyn ApplicationDirectory,
    ) -> Option<AppKey> {
        self.ensure_indexed(directory);

        let launcher = LauncherOverride {
            identity: identity.trim().to_lowercase(),
            path: path.to_path_buf(),
        };
        let id = self.load_override(directory, &launcher)?;

        self.launcher_overrides
            .retain(|existing| existing.identity != launcher.identity);
        self.launcher_overrides.push(launcher);
        Some(AppKey::Entry(id))
    }

    fn load_override(
        &mut self,
        directory: &dyn ApplicationDirectory,
        launcher: &LauncherOverride,
    ) -> Option<String> {
        let entry = match directory.entry_from_path(&launcher.path) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(
                    "failed to add user-set app '{}' for launcher '{}'",
                    launcher.identity,
                    launcher.path.display()
                );
                return None;
            }
            Err(e) => {
                warn!("failed to read launcher '{}': {e}", launcher.path.display());
                return None;
            }
        };

        let id = entry.id.to_lowercase();
        self.index_entry(entry);
        self.overrides
            .insert(launcher.identity.to_lowercase(), id.clone());
        debug!(
            "added user-set app '{}' for launcher '{}'",
            launcher.identity,
            launcher.path.display()
        );
        Some(id)
    }

    fn index_entry(&mut self, entry: Application) {
        let lower_id = entry.id.trim().to_lowercase();
        if lower_id.is_empty() {
            return;
        }
        let key = AppKey::Entry(lower_id.clone());
        if self.catalog.contains_key(&key) {
            return;
        }

        let name = entry.name.trim().to_lowercase();
        if !name.is_empty() && !name.contains(' ') && name != lower_id {
            self.by_name
                .entry(name.clone())
                .or_insert_with(|| lower_id.clone());
        }

        if let Some(exec) = entry.exec.as_deref().and_then(exec_name) {
            if exec != lower_id && exec != name && !EXCLUDED_BINARIES.contains(&exec.as_str()) {
                self.by_name.entry(exec).or_insert_with(|| lower_id.clone());
            }
        }

        if let Some(class) = entry.startup_wm_class.as_deref() {
            let class = class.trim().to_lowercase();
            if !class.is_empty() {
                self.by_wm_class.insert(class, lower_id.clone());
            }
        }

        self.catalog.insert(key, entry);
    }

    pub fn application(&self, key: &AppKey) -> Option<&Application> {
        self.catalog.get(key)
    }

    /// Forget placeholders for which `keep` is false. Desktop entries stay.
    pub fn retain_placeholders(&mut self, mut keep: impl FnMut(&AppKey) -> bool) {
        self.catalog
            .retain(|key, _| !key.is_placeholder() || keep(key));
    }

    pub fn launcher_overrides(&self) -> &[LauncherOverride] {
        &self.launcher_overrides
    }

    /// Number of desktop entries currently indexed.
    pub fn entry_count(&self) -> usize {
        self.catalog.keys().filter(|k| !k.is_placeholder()).count()
    }
}

fn translate(identity: String) -> String {
    IDENTITY_ALIASES
        .iter()
        .find(|(from, _)| *from == identity)
        .map(|(_, to)| to.to_string())
        .unwrap_or(identity)
}

/// Lowercase basename of the program an `Exec` line starts.
fn exec_name(exec: &str) -> Option<String> {
    let program = exec.split_whitespace().next()?;
    let name = basename(program).to_lowercase();
    (!name.is_empty()).then_some(name)
}
