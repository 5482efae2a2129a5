use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use taskdock_common::DirectoryError;
use taskdock_core::{Application, ApplicationDirectory};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::exec::command_line;
use super::parser::{parse_desktop_entry, DesktopEntry};
use crate::paths::application_dirs;

/// Desktop entries read from a list of directories, first directory
/// first. Subdirectories are scanned too.
#[derive(Debug, Clone)]
pub struct XdgDirectory {
    dirs: Vec<PathBuf>,
}

impl XdgDirectory {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The XDG application directories followed by `extra_dirs`.
    pub fn from_environment(extra_dirs: &[PathBuf]) -> Self {
        let mut dirs = application_dirs();
        for dir in extra_dirs {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        Self::new(dirs)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Scan one directory. An id already in `seen` is shadowed; a hidden
    /// entry still claims its id, so it masks the same id further down.
    fn scan_dir(&self, dir: &Path, seen: &mut HashSet<String>, out: &mut Vec<Application>) {
        if !dir.is_dir() {
            debug!("application directory {} does not exist", dir.display());
            return;
        }
        let walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
        for entry in walker.into_iter().filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable path under {}: {err}", dir.display());
                None
            }
        }) {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "desktop") {
                continue;
            }
            let id = entry_id(path);
            if seen.contains(&id) {
                debug!("desktop entry {} shadowed by an earlier '{id}'", path.display());
                continue;
            }
            match read_entry(path) {
                Ok(parsed) => {
                    seen.insert(id);
                    if parsed.is_listed() {
                        out.push(parsed.app);
                    } else {
                        debug!("hidden desktop entry {}", path.display());
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
    }
}

fn entry_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_entry(path: &Path) -> Result<DesktopEntry, DirectoryError> {
    let content = std::fs::read_to_string(path)?;
    parse_desktop_entry(&entry_id(path), path, &content)
}

/// Start `argv` without waiting for it. The child is reaped on a helper
/// thread.
fn spawn_detached(app: &str, argv: &[String]) -> Result<(), DirectoryError> {
    let (program, args) = argv.split_first().ok_or_else(|| DirectoryError::LaunchFailed {
        app: app.to_string(),
        reason: "empty Exec".into(),
    })?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DirectoryError::LaunchFailed {
            app: app.to_string(),
            reason: e.to_string(),
        })?;
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

impl ApplicationDirectory for XdgDirectory {
    fn entries(&self) -> Result<Vec<Application>, DirectoryError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for dir in &self.dirs {
            self.scan_dir(dir, &mut seen, &mut entries);
        }
        debug!(count = entries.len(), "scanned desktop entries");
        Ok(entries)
    }

    fn entry_from_path(&self, path: &Path) -> Result<Option<Application>, DirectoryError> {
        if !path.is_file() {
            return Ok(None);
        }
        let parsed = read_entry(path)?;
        Ok(Some(parsed.app))
    }

    fn launch(&self, app: &Application, action: Option<&str>) -> Result<(), DirectoryError> {
        let failed = |reason: &str| DirectoryError::LaunchFailed {
            app: app.name.clone(),
            reason: reason.to_string(),
        };
        if app.is_placeholder() {
            return Err(failed("no desktop entry"));
        }

        let exec = match action {
            None => app.exec.clone(),
            Some(action) => {
                let path = app.path.as_deref().ok_or_else(|| failed("entry has no path"))?;
                read_entry(path)?.action_exec(action).map(str::to_string)
            }
        };
        let exec = exec.ok_or_else(|| failed("empty Exec"))?;
        let argv = command_line(&app.name, &exec)?;
        spawn_detached(&app.name, &argv)?;
        info!(app = %app.id, action = ?action, "launched {exec}");
        Ok(())
    }
}
