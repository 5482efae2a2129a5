//! The long-running dock: config reloads and directory changes applied
//! one batch at a time on the main task.

use std::path::PathBuf;

use taskdock_common::Result;
use taskdock_config::ReloadManager;
use taskdock_core::{Dock, NoopProvider};
use taskdock_platform::{DirectoryWatcher, XdgDirectory};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::boot::{dock_options, dock_settings};
use crate::bridge::{ConfigStore, LoggingObserver};

pub async fn run(config_path: PathBuf) -> Result<()> {
    let (config, mut config_rx) = ReloadManager::start(config_path.clone()).await;

    let directory = XdgDirectory::from_environment(&config.directory.extra_dirs);
    let (dir_tx, mut dir_rx) = mpsc::channel::<()>(4);
    if config.directory.watch {
        let watcher = DirectoryWatcher::new(directory.dirs().to_vec());
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(dir_tx).await {
                warn!("application directory watcher stopped: {e}");
            }
        });
    }

    let store = ConfigStore::new(config_path, config.clone());
    // The display-server binding lives outside this crate.
    let mut dock = Dock::new(
        Box::new(NoopProvider),
        Box::new(directory),
        Box::new(LoggingObserver),
        Box::new(store.clone()),
        dock_settings(&config),
    );
    dock.start();

    loop {
        tokio::select! {
            Ok(()) = config_rx.changed() => {
                let config = config_rx.borrow_and_update().clone();
                info!("applying reloaded config");
                dock.set_options(dock_options(&config.behavior));
                store.replace_config(config);
            }
            Some(()) = dir_rx.recv() => {
                dock.applications_changed();
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!("failed to listen for shutdown signal: {e}");
                }
                info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}
