//! A downloaded file waiting to be relayed. Removing the file is tied to the value's lifetime.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Local media file plus its display title and size.
///
/// Call [`MediaArtifact::discard`] once the file has been sent (or rejected); if the value is dropped
/// without it, `Drop` removes the file synchronously.
#[derive(Debug)]
pub struct MediaArtifact {
    path: PathBuf,
    title: String,
    size: u64,
    removed: bool,
}

impl MediaArtifact {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            size,
            removed: false,
        }
    }

    /// Wraps an existing file, reading its size from disk.
    pub async fn from_file(path: impl Into<PathBuf>, title: impl Into<String>) -> io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a regular file", path.display()),
            ));
        }
        Ok(Self::new(path, title, metadata.len()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Size in bytes at the time the artifact was created.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Removes the backing file. A file that is already gone is not an error.
    pub async fn discard(mut self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "Removed media file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove media file"),
        }
        self.removed = true;
    }
}

impl Drop for MediaArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed media file on drop"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove media file on drop"),
        }
    }
}
