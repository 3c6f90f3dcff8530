//! User-facing texts. Failure details never reach the chat; they go to the logs.

pub const MSG_START: &str = "Hi! 👋\n\n\
Send me a link to a video (YouTube, TikTok, Instagram and more) and I'll download it for you.\n\n\
Once the video arrives you can also grab just its audio.";

pub const MSG_INVALID_LINK: &str = "❌ Please send a valid video link.";

pub const MSG_PROCESSING_VIDEO: &str = "⏳ Processing video...";
pub const MSG_SENDING_VIDEO: &str = "📤 Sending video...";
pub const MSG_VIDEO_DOWNLOAD_FAILED: &str = "❌ Could not download the video. Check the link.";
pub const MSG_VIDEO_TOO_LARGE: &str = "❌ The video is too large to send through Telegram.";
pub const MSG_VIDEO_FAILED: &str = "❌ An error occurred while processing the video.";

pub const MSG_EXTRACTING_AUDIO: &str = "⏳ Extracting audio...";
pub const MSG_SENDING_AUDIO: &str = "📤 Sending audio...";
pub const MSG_AUDIO_EXTRACT_FAILED: &str = "❌ Could not extract audio from the video.";
pub const MSG_AUDIO_FAILED: &str = "❌ An error occurred while extracting audio.";

pub const MSG_DOWNLOAD_TIMEOUT: &str = "❌ The download took too long. Please try again later.";

/// Label of the inline button offered under every sent video.
pub const AUDIO_BUTTON_LABEL: &str = "🎵 Download audio only";

pub fn video_caption(title: &str) -> String {
    format!("🎬 {}", title)
}

pub fn audio_caption(title: &str) -> String {
    format!("🎵 {}", title)
}
