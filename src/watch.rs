//! File watching for live preview.
//!
//! The notify callback runs on the watcher's own thread and forwards
//! events for the target file over a tokio channel.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Events from the file watcher
#[derive(Debug)]
pub enum WatchEvent {
    Changed(PathBuf),
    Error(notify::Error),
}

/// Watches one document and reports when it changes
pub struct PreviewWatcher {
    target: PathBuf,
    watcher: Option<RecommendedWatcher>,
    rx: mpsc::UnboundedReceiver<WatchEvent>,
}

impl PreviewWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        // OS event paths are canonical
        let target = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let parent = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::unbounded_channel();
        let filter_target = target.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                        if event.paths.iter().any(|p| is_same_file(p, &filter_target)) {
                            let _ = tx.send(WatchEvent::Changed(filter_target.clone()));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e));
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", parent.display()))?;
        log::info!("Watching {}", target.display());

        Ok(Self {
            target,
            watcher: Some(watcher),
            rx,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Stop watching; pending events are still delivered, then
    /// `next_change` returns `None`
    pub fn stop(&mut self) {
        // dropping the watcher drops the event sender
        self.watcher = None;
    }

    /// Wait for the next change, coalescing events that arrive within `debounce`
    ///
    /// Returns `None` once the watcher has shut down.
    pub async fn next_change(&mut self, debounce: Duration) -> Option<PathBuf> {
        loop {
            match self.rx.recv().await? {
                WatchEvent::Changed(path) => {
                    tokio::time::sleep(debounce).await;
                    drain_pending(&mut self.rx);
                    return Some(path);
                }
                WatchEvent::Error(e) => log_watch_error(&e),
            }
        }
    }
}

fn log_watch_error(e: &notify::Error) {
    log::error!("File watcher error: {}", e);
}

/// Discard queued change events, logging any errors among them
///
/// Returns the number of errors seen.
fn drain_pending(rx: &mut mpsc::UnboundedReceiver<WatchEvent>) -> usize {
    let mut errors = 0;
    while let Ok(event) = rx.try_recv() {
        if let WatchEvent::Error(e) = event {
            log_watch_error(&e);
            errors += 1;
        }
    }
    errors
}

fn is_same_file(event_path: &Path, target: &Path) -> bool {
    event_path == target
}
