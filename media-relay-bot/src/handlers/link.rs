//! Link validation and the payload of the "audio only" button.

use reqwest::Url;

use crate::core::{InlineAction, RelayError};

use super::messages::AUDIO_BUTTON_LABEL;

/// Prefix of callback payloads that request audio extraction; the rest of the payload is the original link.
pub const AUDIO_CALLBACK_PREFIX: &str = "audio:";

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Accepts text that is a single http(s) URL with a host. Returns the trimmed text as sent, not a re-serialized URL.
pub fn parse_media_url(text: &str) -> Result<String, RelayError> {
    let candidate = text.trim();
    let url = Url::parse(candidate)
        .map_err(|e| RelayError::InvalidInput(format!("{}: {}", e, candidate)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::InvalidInput(format!(
            "unsupported scheme {}",
            url.scheme()
        )));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate.to_string()),
        _ => Err(RelayError::InvalidInput(format!("no host in {}", candidate))),
    }
}

/// Button that re-requests `url` as audio. `None` when the payload would exceed Telegram's callback data limit.
pub fn audio_action(url: &str) -> Option<InlineAction> {
    let payload = format!("{}{}", AUDIO_CALLBACK_PREFIX, url);
    if payload.len() > MAX_CALLBACK_DATA_BYTES {
        return None;
    }
    Some(InlineAction {
        label: AUDIO_BUTTON_LABEL.to_string(),
        payload,
    })
}

/// Link carried by an audio button payload, verbatim.
pub fn decode_audio_payload(data: &str) -> Option<&str> {
    data.strip_prefix(AUDIO_CALLBACK_PREFIX)
        .filter(|url| !url.is_empty())
}
