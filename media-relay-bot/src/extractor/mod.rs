//! Extraction client: turns a link into a local media file.
//!
//! [`Extractor`] is the seam handlers depend on; [`YtDlpExtractor`] runs the `yt-dlp` executable.
//! Files land in a [`ScratchDir`] and are owned by the returned [`MediaArtifact`].

mod artifact;
mod scratch;
mod ytdlp;

use async_trait::async_trait;

use crate::core::{DownloadRequest, ExtractionError};

pub use artifact::MediaArtifact;
pub use scratch::{ScratchDir, ScratchSlot};
pub use ytdlp::YtDlpExtractor;

/// Fetches media for a [`DownloadRequest`]. Implementations log their own failures and return them typed.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn fetch(&self, request: &DownloadRequest) -> Result<MediaArtifact, ExtractionError>;

    /// Best video encoding up to 720p, single item only.
    async fn fetch_video(&self, url: &str) -> Result<MediaArtifact, ExtractionError> {
        self.fetch(&DownloadRequest::video(url)).await
    }

    /// Best audio stream, transcoded to MP3.
    async fn fetch_audio_only(&self, url: &str) -> Result<MediaArtifact, ExtractionError> {
        self.fetch(&DownloadRequest::audio(url)).await
    }
}
