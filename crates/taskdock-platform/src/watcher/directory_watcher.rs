use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use taskdock_common::DirectoryError;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Package managers touch many entries at once; one signal per burst.
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches application directories for `.desktop` changes.
pub struct DirectoryWatcher {
    dirs: Vec<PathBuf>,
}

pub(crate) fn is_entry_change(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| is_desktop_file(p))
}

fn is_desktop_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "desktop")
}

impl DirectoryWatcher {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Send `()` on `tx` once per burst of entry changes. Directories
    /// that do not exist are skipped. Runs until `tx` is closed.
    pub async fn watch(&self, tx: mpsc::Sender<()>) -> Result<(), DirectoryError> {
        let (notify_tx, mut notify_rx) = mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if is_entry_change(&event) => {
                    debug!(paths = ?event.paths, "desktop entry change detected");
                    let _ = notify_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("directory watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| DirectoryError::WatchError(format!("failed to create watcher: {e}")))?;

        let mut watched = 0;
        for dir in self.dirs.iter().filter(|d| d.is_dir()) {
            match watcher.watch(dir, RecursiveMode::Recursive) {
                Ok(()) => watched += 1,
                Err(e) => warn!("failed to watch {}: {e}", dir.display()),
            }
        }
        if watched == 0 {
            return Err(DirectoryError::WatchError(
                "no application directory could be watched".into(),
            ));
        }
        info!(dirs = watched, "watching application directories");

        while notify_rx.recv().await.is_some() {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(DEBOUNCE) => break,
                    msg = notify_rx.recv() => {
                        if msg.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            info!("application directory changed");
            if tx.send(()).await.is_err() {
                debug!("directory change receiver dropped, stopping watcher");
                break;
            }
        }

        drop(watcher);
        Ok(())
    }
}
