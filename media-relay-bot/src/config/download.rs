//! Extraction settings: backend executable, scratch directory, timeout.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// SCRATCH_DIR; defaults to `media-relay-bot` under the system temp dir
    pub scratch_dir: PathBuf,
    /// YTDLP_BIN
    pub ytdlp_bin: String,
    /// EXTRACT_TIMEOUT_SECS
    pub extract_timeout_secs: u64,
}

impl DownloadConfig {
    pub fn from_env() -> Self {
        let scratch_dir = env::var("SCRATCH_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("media-relay-bot"));
        let ytdlp_bin = env::var("YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string());
        let extract_timeout_secs = env::var("EXTRACT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(300);

        Self {
            scratch_dir,
            ytdlp_bin,
            extract_timeout_secs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ytdlp_bin.trim().is_empty() {
            anyhow::bail!("YTDLP_BIN is set but empty");
        }
        if self.extract_timeout_secs == 0 {
            anyhow::bail!("EXTRACT_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }
}
