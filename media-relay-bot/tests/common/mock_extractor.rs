//! mockall double for the [`media_relay_bot::Extractor`] seam plus helpers that fake downloaded files.

use async_trait::async_trait;
use media_relay_bot::{DownloadRequest, ExtractionError, Extractor, MediaArtifact};
use mockall::mock;
use std::path::{Path, PathBuf};

mock! {
    pub Backend {}

    #[async_trait]
    impl Extractor for Backend {
        async fn fetch(&self, request: &DownloadRequest) -> Result<MediaArtifact, ExtractionError>;
    }
}

/// Writes a small placeholder file under `dir` and wraps it as an artifact that claims `size` bytes.
pub fn fake_artifact(dir: &Path, file_name: &str, title: &str, size: u64) -> MediaArtifact {
    let path: PathBuf = dir.join(file_name);
    std::fs::write(&path, b"media").expect("write fake media file");
    MediaArtifact::new(path, title, size)
}
