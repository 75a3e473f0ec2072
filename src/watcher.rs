// p8cart - A codec for PICO-8 cartridge containers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Watching a cartridge file so that a conversion can be re-run whenever
//! it changes.
//!
//! Editors save in different ways (truncate and write, write a temporary
//! file and rename it over the original, or rename the original away
//! first), so the parent directory is watched and events are filtered down
//! to the cartridge path.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

/// Bursts of events within this window count as one change.
pub const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Errors raised while watching.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("watch failed: {0}")]
    Event(#[from] notify::Error),

    #[error("watch channel closed")]
    Closed,
}

/// Watches a single cartridge file.
pub struct CartWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl CartWatcher {
    /// Start watching `path`, which must exist.
    pub fn new(path: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;

        let canonical = path.canonicalize().map_err(|source| WatchError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = canonical.parent() {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .map_err(|source| WatchError::Watch {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        log::debug!("watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            rx,
            path: canonical,
        })
    }

    /// The canonical path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the cartridge changes, then swallow the rest of the
    /// burst.
    pub fn wait_for_change(&self) -> Result<(), WatchError> {
        loop {
            let event = self.rx.recv().map_err(|_| WatchError::Closed)??;
            if !self.is_relevant(&event) {
                continue;
            }

            std::thread::sleep(DEBOUNCE_DURATION);
            while self.rx.try_recv().is_ok() {}
            log::debug!("{} changed", self.path.display());
            return Ok(());
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return false;
        }
        event.paths.iter().any(|path| same_file(path, &self.path))
    }
}

/// Compare an event path with the watched path. A path that no longer
/// resolves is compared by parent directory and file name.
fn same_file(event_path: &Path, watched: &Path) -> bool {
    if let Ok(canonical) = event_path.canonicalize() {
        return canonical == watched;
    }
    let parent = event_path.parent().and_then(|p| p.canonicalize().ok());
    parent.as_deref() == watched.parent() && event_path.file_name() == watched.file_name()
}
