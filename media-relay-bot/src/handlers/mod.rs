//! Request orchestration: one handler per kind of inbound event.
//!
//! [`VideoLinkHandler`] turns a link into a video upload, [`AudioCallbackHandler`] serves the
//! "audio only" button under that video, [`StartHandler`] greets. Each request owns one status
//! message that is edited through the stages and deleted on success, or replaced by a notice on failure.

mod audio;
mod link;
pub mod messages;
mod logging;
mod start;
mod status;
mod video;

use tracing::{error, warn};

use crate::core::{ExtractionError, RelayError, Result};
use crate::extractor::MediaArtifact;

pub use audio::AudioCallbackHandler;
pub use link::{
    audio_action, decode_audio_payload, parse_media_url, AUDIO_CALLBACK_PREFIX,
    MAX_CALLBACK_DATA_BYTES,
};
pub use logging::LoggingHandler;
pub use start::StartHandler;
pub use status::StatusMessage;
pub use video::VideoLinkHandler;

use messages::*;

/// Largest file the Bot API accepts for upload by a bot (50 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Notices shown for each failure class of one pipeline.
pub(crate) struct FailureNotices {
    extraction: &'static str,
    other: &'static str,
}

pub(crate) const VIDEO_NOTICES: FailureNotices = FailureNotices {
    extraction: MSG_VIDEO_DOWNLOAD_FAILED,
    other: MSG_VIDEO_FAILED,
};

pub(crate) const AUDIO_NOTICES: FailureNotices = FailureNotices {
    extraction: MSG_AUDIO_EXTRACT_FAILED,
    other: MSG_AUDIO_FAILED,
};

/// Only the video path checks size, so the size notice is shared.
pub(crate) fn failure_notice(err: &RelayError, notices: &FailureNotices) -> &'static str {
    match err {
        RelayError::Extraction(ExtractionError::Timeout(_)) => MSG_DOWNLOAD_TIMEOUT,
        RelayError::Extraction(_) => notices.extraction,
        RelayError::SizeLimitExceeded { .. } => MSG_VIDEO_TOO_LARGE,
        _ => notices.other,
    }
}

pub(crate) fn log_failure(err: &RelayError, url: &str) {
    match err {
        RelayError::SizeLimitExceeded { size, limit } => {
            warn!(url = %url, size, limit, "Media exceeds upload limit")
        }
        _ => error!(url = %url, error = %err, "Request failed"),
    }
}

/// Passes the artifact through when it fits the upload limit; otherwise removes it.
pub(crate) async fn ensure_uploadable(artifact: MediaArtifact) -> Result<MediaArtifact> {
    let size = artifact.size();
    if size > MAX_UPLOAD_BYTES {
        artifact.discard().await;
        return Err(RelayError::SizeLimitExceeded {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(artifact)
}
