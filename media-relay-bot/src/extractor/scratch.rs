//! Scratch directory for downloads in flight. Each request gets its own file stem.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::MediaKind;

/// Directory shared by all requests; names never derive from media titles, so concurrent requests cannot collide.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

/// Per-request file stem inside a [`ScratchDir`]; the backend picks the extension.
#[derive(Debug, Clone)]
pub struct ScratchSlot {
    root: PathBuf,
    stem: String,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory if needed.
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Reserves a fresh stem: `<kind>-<uuid v4>`.
    pub fn allocate(&self, kind: MediaKind) -> ScratchSlot {
        ScratchSlot {
            root: self.root.clone(),
            stem: format!("{}-{}", kind, Uuid::new_v4()),
        }
    }

    /// Removes every file belonging to `slot` (partial downloads, intermediate streams). Returns how many were removed.
    pub async fn sweep(&self, slot: &ScratchSlot) -> usize {
        self.remove_matching(|name| slot.owns(name)).await
    }

    /// Removes every file this store allocated (any `video-*` / `audio-*` file), leaving foreign files alone.
    /// Run at startup to clear leftovers of a crashed process.
    pub async fn purge(&self) -> io::Result<usize> {
        self.ensure().await?;
        let removed = self
            .remove_matching(|name| {
                [MediaKind::Video, MediaKind::Audio]
                    .iter()
                    .any(|kind| name.starts_with(&format!("{}-", kind)))
            })
            .await;
        info!(dir = %self.root.display(), removed, "Scratch directory purged");
        Ok(removed)
    }

    async fn remove_matching(&self, mut matches: impl FnMut(&str) -> bool) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.root.display(), error = %e, "Cannot read scratch directory");
                return 0;
            }
        };

        let mut removed = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %self.root.display(), error = %e, "Scratch directory listing failed");
                    break;
                }
            };
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !matches(name) {
                continue;
            }
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => {
                    debug!(file = %name, "Removed scratch file");
                    removed += 1;
                }
                Err(e) => warn!(file = %name, error = %e, "Failed to remove scratch file"),
            }
        }
        removed
    }
}

impl ScratchSlot {
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Output template handed to the backend: `<root>/<stem>.%(ext)s`.
    pub fn output_template(&self) -> PathBuf {
        self.root.join(format!("{}.%(ext)s", self.stem))
    }

    /// True when `file_name` was produced for this slot.
    pub fn owns(&self, file_name: &str) -> bool {
        file_name
            .strip_prefix(self.stem.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }
}
