//! yt-dlp backed [`Extractor`]. Requires the yt-dlp executable (and ffmpeg for audio) on the host.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::core::{DownloadRequest, ExtractionError, MediaKind};

use super::{Extractor, MediaArtifact, ScratchDir, ScratchSlot};

/// Format selector for video requests: best single file no taller than 720p.
pub const VIDEO_FORMAT: &str = "best[height<=720]";
/// Format selector for audio requests before transcoding.
pub const AUDIO_FORMAT: &str = "bestaudio/best";
/// Codec and bitrate of the audio post-processing step.
pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_QUALITY: &str = "192K";

/// How long a killed backend gets to release its output pipes before its task is dropped.
const REAP_GRACE: Duration = Duration::from_secs(5);

/// Printed once the file reached its final location (after post-processing): `<title>\t<path>`.
const PRINT_TEMPLATE: &str = "after_move:%(title)s\t%(filepath)s";

/// Runs yt-dlp as a child process per request, inside a spawned task bounded by `timeout`.
pub struct YtDlpExtractor {
    bin: String,
    scratch: ScratchDir,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<String>, scratch: ScratchDir, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            scratch,
            timeout,
        }
    }

    async fn run(
        &self,
        request: &DownloadRequest,
        slot: &ScratchSlot,
    ) -> Result<MediaArtifact, ExtractionError> {
        self.scratch.ensure().await.map_err(ExtractionError::Scratch)?;

        let mut cmd = Command::new(&self.bin);
        cmd.args(backend_args(request, &slot.output_template()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout also reaches the ffmpeg children yt-dlp starts.
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|source| ExtractionError::Spawn {
            bin: self.bin.clone(),
            source,
        })?;
        let pid = child.id();

        let mut task = tokio::spawn(child.wait_with_output());
        let output = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(Ok(output))) => output,
            Ok(Ok(Err(e))) => {
                return Err(ExtractionError::Failed {
                    status: "unknown".to_string(),
                    stderr: e.to_string(),
                })
            }
            Ok(Err(join_error)) => return Err(ExtractionError::Aborted(join_error.to_string())),
            Err(_) => {
                terminate(pid, task).await;
                return Err(ExtractionError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                status: output.status.to_string(),
                stderr: summarize_stderr(&output.stderr),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (title, path) = parse_output_line(&stdout).ok_or(ExtractionError::NoOutput)?;
        let title = if title.is_empty() {
            default_title(request.kind).to_string()
        } else {
            title
        };

        MediaArtifact::from_file(&path, title)
            .await
            .map_err(|_| ExtractionError::MissingFile(path.display().to_string()))
    }
}

/// Kills the backend and everything it started, then waits until the process tree has closed its
/// pipes. Only after that can no process write into the scratch slot any more.
async fn terminate(pid: Option<u32>, mut task: JoinHandle<io::Result<Output>>) {
    match pid {
        Some(pid) => kill_process_tree(pid),
        None => warn!("Backend exited before it could be killed"),
    }
    if tokio::time::timeout(REAP_GRACE, &mut task).await.is_err() {
        warn!("Backend still holds its pipes after kill; dropping it");
        task.abort();
        let _ = task.await;
    }
}

#[cfg(unix)]
fn kill_process_tree(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal. The group id is the pid of a child created with
    // `process_group(0)` that is still owned by the unfinished wait task.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        warn!(pgid, error = %io::Error::last_os_error(), "Failed to kill backend process group");
    }
}

// Dropping the aborted task kills the child through `kill_on_drop`.
#[cfg(not(unix))]
fn kill_process_tree(_pid: u32) {}

#[async_trait]
impl Extractor for YtDlpExtractor {
    #[instrument(skip(self, request), fields(url = %request.url, kind = %request.kind))]
    async fn fetch(&self, request: &DownloadRequest) -> Result<MediaArtifact, ExtractionError> {
        let slot = self.scratch.allocate(request.kind);
        info!(stem = %slot.stem(), "Starting extraction");

        match self.run(request, &slot).await {
            Ok(artifact) => {
                info!(
                    path = %artifact.path().display(),
                    title = %artifact.title(),
                    size = artifact.size(),
                    "Extraction finished"
                );
                Ok(artifact)
            }
            Err(e) => {
                error!(error = %e, "Extraction failed");
                let swept = self.scratch.sweep(&slot).await;
                if swept > 0 {
                    warn!(swept, stem = %slot.stem(), "Removed partial files of failed extraction");
                }
                Err(e)
            }
        }
    }
}

/// Command line for one request. The URL goes last, after `--`, so it is never read as an option.
pub fn backend_args(request: &DownloadRequest, output_template: &Path) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--no-playlist".into(),
        "--no-progress".into(),
        "--no-simulate".into(),
        "--no-mtime".into(),
    ];

    match request.kind {
        MediaKind::Video => {
            args.extend(["-f".to_string(), VIDEO_FORMAT.to_string()]);
        }
        MediaKind::Audio => {
            args.extend([
                "-f".to_string(),
                AUDIO_FORMAT.to_string(),
                "-x".to_string(),
                "--audio-format".to_string(),
                AUDIO_CODEC.to_string(),
                "--audio-quality".to_string(),
                AUDIO_QUALITY.to_string(),
            ]);
        }
    }

    args.extend([
        "-o".to_string(),
        output_template.to_string_lossy().into_owned(),
        "--print".to_string(),
        PRINT_TEMPLATE.to_string(),
        "--".to_string(),
        request.url.clone(),
    ]);
    args
}

/// Reads the last `<title>\t<path>` line printed by the backend.
fn parse_output_line(stdout: &str) -> Option<(String, PathBuf)> {
    let line = stdout.lines().rev().find(|l| !l.trim().is_empty())?;
    let (title, path) = line.rsplit_once('\t')?;
    let path = path.trim();
    if path.is_empty() || path == "NA" {
        return None;
    }
    Some((title.trim().to_string(), PathBuf::from(path)))
}

/// Keeps the `ERROR:` lines of the backend's stderr, or its last line when there are none.
fn summarize_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let errors: Vec<&str> = text.lines().filter(|l| l.contains("ERROR:")).collect();
    if errors.is_empty() {
        text.lines().last().unwrap_or("").trim().to_string()
    } else {
        errors.join("\n")
    }
}

fn default_title(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "Video",
        MediaKind::Audio => "Audio",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_video_args_limit_height_and_disable_playlists() {
        let args = backend_args(
            &DownloadRequest::video("https://example.com/v/1"),
            Path::new("/tmp/s/video-1.%(ext)s"),
        );
        assert!(args.contains(&"--no-playlist".to_string()));
        let f = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f + 1], VIDEO_FORMAT);
        assert!(!args.contains(&"-x".to_string()));
        let o = args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(args[o + 1], "/tmp/s/video-1.%(ext)s");
        assert_eq!(args[args.len() - 2..], ["--", "https://example.com/v/1"]);
    }

    #[test]
    fn test_audio_args_transcode_to_mp3() {
        let args = backend_args(
            &DownloadRequest::audio("https://example.com/v/1"),
            Path::new("/tmp/s/audio-1.%(ext)s"),
        );
        let f = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f + 1], AUDIO_FORMAT);
        assert!(args.contains(&"-x".to_string()));
        let codec = args.iter().position(|a| a == "--audio-format").unwrap();
        assert_eq!(args[codec + 1], "mp3");
        let quality = args.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(args[quality + 1], "192K");
    }

    #[test]
    fn test_parse_output_line_uses_last_tab_and_last_line() {
        let out = "warning noise\nMy\tTitle\t/tmp/s/video-1.mp4\n\n";
        let (title, path) = parse_output_line(out).unwrap();
        assert_eq!(title, "My\tTitle");
        assert_eq!(path, PathBuf::from("/tmp/s/video-1.mp4"));
    }

    #[test]
    fn test_parse_output_line_rejects_missing_path() {
        assert!(parse_output_line("").is_none());
        assert!(parse_output_line("just a title").is_none());
        assert!(parse_output_line("title\tNA").is_none());
    }

    #[test]
    fn test_summarize_stderr_prefers_error_lines() {
        let stderr = b"[generic] Extracting\nERROR: Unsupported URL: x\nbye";
        assert_eq!(summarize_stderr(stderr), "ERROR: Unsupported URL: x");
        assert_eq!(summarize_stderr(b"one\ntwo"), "two");
    }

    #[cfg(unix)]
    fn fake_backend(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Writes "data" to the -o template with ext=mp4 and prints `<title>\t<path>`.
    #[cfg(unix)]
    const WRITES_FILE: &str = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
file=$(printf '%s' "$out" | sed 's/%(ext)s/mp4/')
printf 'data' > "$file"
printf 'Test Clip\t%s\n' "$file""#;

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_fetch_returns_artifact_from_backend_output() {
        let bin_dir = TempDir::new().unwrap();
        let scratch_dir = TempDir::new().unwrap();
        let bin = fake_backend(bin_dir.path(), WRITES_FILE);
        let extractor = YtDlpExtractor::new(
            bin,
            ScratchDir::new(scratch_dir.path()),
            Duration::from_secs(10),
        );

        let artifact = extractor.fetch_video("https://example.com/v/1").await.unwrap();
        assert_eq!(artifact.title(), "Test Clip");
        assert_eq!(artifact.size(), 4);
        assert!(artifact.path().starts_with(scratch_dir.path()));
        let path = artifact.path().to_path_buf();
        artifact.discard().await;
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_fetch_reports_backend_failure() {
        let bin_dir = TempDir::new().unwrap();
        let scratch_dir = TempDir::new().unwrap();
        let bin = fake_backend(bin_dir.path(), "echo 'ERROR: Unsupported URL' >&2\nexit 1");
        let extractor = YtDlpExtractor::new(
            bin,
            ScratchDir::new(scratch_dir.path()),
            Duration::from_secs(10),
        );

        let err = extractor.fetch_video("https://nowhere.invalid/x").await.unwrap_err();
        match err {
            ExtractionError::Failed { stderr, .. } => assert!(stderr.contains("Unsupported URL")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_fetch_times_out_and_sweeps_partials() {
        let bin_dir = TempDir::new().unwrap();
        let scratch_dir = TempDir::new().unwrap();
        let body = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
printf 'partial' > "$(printf '%s' "$out" | sed 's/%(ext)s/mp4.part/')"
sleep 5"#;
        let bin = fake_backend(bin_dir.path(), body);
        let extractor = YtDlpExtractor::new(
            bin,
            ScratchDir::new(scratch_dir.path()),
            Duration::from_millis(500),
        );

        let err = extractor.fetch_audio_only("https://example.com/slow").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Timeout(_)));
        let leftovers = std::fs::read_dir(scratch_dir.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    /// **Test: a timed-out backend cannot leave files behind through processes it started.**
    ///
    /// **Setup:** backend forks a "transcoder" that writes `<stem>.mp3` after 1 s, then hangs.
    /// **Action:** `fetch_audio_only` with a 300 ms timeout; wait past the transcoder's write time.
    /// **Expected:** Timeout; the scratch directory stays empty.
    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_timeout_kills_backend_children() {
        let bin_dir = TempDir::new().unwrap();
        let scratch_dir = TempDir::new().unwrap();
        let body = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
file=$(printf '%s' "$out" | sed 's/%(ext)s/mp3/')
( sleep 1; printf 'transcoded' > "$file" ) &
sleep 5"#;
        let bin = fake_backend(bin_dir.path(), body);
        let extractor = YtDlpExtractor::new(
            bin,
            ScratchDir::new(scratch_dir.path()),
            Duration::from_millis(300),
        );

        let err = extractor.fetch_audio_only("https://example.com/slow").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Timeout(_)));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let leftovers: Vec<String> = std::fs::read_dir(scratch_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(leftovers.is_empty(), "left behind: {leftovers:?}");
    }

    #[tokio::test]
    async fn test_fetch_reports_missing_backend() {
        let scratch_dir = TempDir::new().unwrap();
        let extractor = YtDlpExtractor::new(
            "/nonexistent/yt-dlp-binary",
            ScratchDir::new(scratch_dir.path()),
            Duration::from_secs(1),
        );
        let err = extractor.fetch_video("https://example.com/v/1").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Spawn { .. }));
    }
}
