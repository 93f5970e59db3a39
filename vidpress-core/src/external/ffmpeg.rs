//! FFmpeg invocation and progress scraping for video transcoding.
//!
//! The encoder is launched as a child process with its stderr piped. FFmpeg
//! writes all diagnostics there: a `Duration:` header once the input is
//! probed, then a `frame=` status line it keeps rewriting with carriage
//! returns. This module scrapes those lines to derive a completion fraction
//! and reports through the [`EventDispatcher`](crate::events::EventDispatcher).

use crate::error::{CoreError, CoreResult};
use crate::events::{EventDispatcher, TranscodeEvent};
use crate::utils::parse_ffmpeg_time;

use once_cell::sync::Lazy;
use regex::Regex;
use shared_child::SharedChild;

use std::fmt;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Environment variable overriding the encoder binary location.
pub const FFMPEG_PATH_ENV: &str = "VIDPRESS_FFMPEG_PATH";

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"  Duration: ([0-9]+:[0-9]+:[0-9]+\.[0-9]+), .+").unwrap());
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"time=([0-9]+:[0-9]+:[0-9]+\.[0-9]+)").unwrap());

const DURATION_PREFIX: &str = "  Duration: ";
const FRAME_PREFIX: &str = "frame=";

/// Numeric quality knob passed straight through to the encoder (`-q:v`).
///
/// Unrelated to [`QualityTier`](crate::estimate::QualityTier): that one is an
/// abstract tier keyed into the size-estimation table, this one is an encoder
/// parameter. Keeping them as separate types prevents accidental conflation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality(pub u32);

impl fmt::Display for EncoderQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EncoderQuality {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Parameters for a single transcode job.
#[derive(Debug, Clone)]
pub struct TranscodeParams {
    pub input_path: String,
    pub quality: EncoderQuality,
}

/// Derives the output path: input truncated at its last `.`, then a literal
/// `q_<quality>.mp4` appended. No separator is inserted, so `clip.mov` at
/// quality 55 becomes `clipq_55.mp4` next to the input. An input with no
/// extension loses its whole name and yields `q_<quality>.mp4`.
#[must_use]
pub fn derive_output_path(input_path: &str, quality: EncoderQuality) -> String {
    let stem = match input_path.rfind('.') {
        Some(idx) => &input_path[..idx],
        None => "",
    };
    format!("{stem}q_{quality}.mp4")
}

/// Resolves the encoder binary.
///
/// Order: the `VIDPRESS_FFMPEG_PATH` environment variable, a sidecar `ffmpeg`
/// next to the current executable, then a bare `ffmpeg` left to `PATH`
/// resolution at spawn time.
pub fn resolve_ffmpeg() -> CoreResult<PathBuf> {
    if let Ok(explicit) = std::env::var(FFMPEG_PATH_ENV) {
        let path = PathBuf::from(&explicit);
        if path.is_file() {
            log::debug!("Using encoder from {FFMPEG_PATH_ENV}: {explicit}");
            return Ok(path);
        }
        return Err(CoreError::EncoderNotFound(format!(
            "{FFMPEG_PATH_ENV} set but not a file: {explicit}"
        )));
    }

    let sidecar_name = if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" };
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        let sidecar = exe_dir.join(sidecar_name);
        if sidecar.is_file() {
            log::debug!("Using sidecar encoder: {}", sidecar.display());
            return Ok(sidecar);
        }
    }

    Ok(PathBuf::from("ffmpeg"))
}

/// Builds the argument vector for the encoder invocation.
fn build_encoder_args(params: &TranscodeParams, output_path: &str) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        params.input_path.clone(),
        "-c:v".to_string(),
        "h264_videotoolbox".to_string(),
        "-q:v".to_string(),
        params.quality.to_string(),
        output_path.to_string(),
    ]
}

/// Two-state scraper over the encoder's diagnostic lines.
///
/// Until a `Duration:` header is seen, `frame=` lines cannot be converted to
/// a fraction and produce a warning instead. Every warning is non-fatal: the
/// line is dropped and scraping continues.
struct ProgressScraper<'a> {
    total_duration: Option<f64>,
    dispatcher: &'a EventDispatcher,
}

impl<'a> ProgressScraper<'a> {
    fn new(dispatcher: &'a EventDispatcher) -> Self {
        Self {
            total_duration: None,
            dispatcher,
        }
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
        self.dispatcher.emit(TranscodeEvent::Warning {
            message: message.to_string(),
        });
    }

    fn scan_line(&mut self, line: &str) {
        if line.starts_with(DURATION_PREFIX) {
            match DURATION_RE
                .captures(line)
                .and_then(|caps| parse_ffmpeg_time(&caps[1]))
            {
                Some(total) => self.total_duration = Some(total),
                None => self.warn("Invalid duration format"),
            }
        } else if line.starts_with(FRAME_PREFIX) {
            let Some(total) = self.total_duration else {
                self.warn("No duration found");
                return;
            };
            match TIME_RE
                .captures(line)
                .and_then(|caps| parse_ffmpeg_time(&caps[1]))
            {
                Some(elapsed) => {
                    // Deliberately unclamped: elapsed / total is reported as
                    // the encoder stated it.
                    let fraction = elapsed / total;
                    log::debug!("Transcode progress: {:.1}%", fraction * 100.0);
                    self.dispatcher
                        .emit(TranscodeEvent::Progress { fraction });
                }
                None => self.warn("Invalid time format"),
            }
        }
    }
}

/// Reads one record from the encoder's stderr, terminated by `\n` or `\r`.
///
/// `BufRead::read_until` handles a single delimiter only; ffmpeg rewrites its
/// status line with bare carriage returns, so both bytes end a record here.
fn read_record<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    let mut read = 0;
    loop {
        let (done, used) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    buf.extend_from_slice(&available[..=i]);
                    (true, i + 1)
                }
                None => {
                    buf.extend_from_slice(available);
                    (false, available.len())
                }
            }
        };
        reader.consume(used);
        read += used;
        if done || used == 0 {
            return Ok(read);
        }
    }
}

/// Handle to a running transcode job.
///
/// The job runs on a supervisor thread; the final outcome arrives as a
/// [`TranscodeEvent::Completed`] or [`TranscodeEvent::Failed`] event, not as
/// a return value. Dropping the handle does not stop the job.
pub struct TranscodeHandle {
    child: Arc<SharedChild>,
    cancelled: Arc<AtomicBool>,
    supervisor: JoinHandle<()>,
    output_path: PathBuf,
}

impl TranscodeHandle {
    /// Path the encoder was told to write.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Kills the encoder process. The job then reports
    /// `Failed { "transcode cancelled" }` through its dispatcher.
    pub fn cancel(&self) -> CoreResult<()> {
        self.cancelled.store(true, Ordering::Relaxed);
        self.child.kill().map_err(CoreError::Io)
    }

    /// Blocks until the job has finished and all events have been delivered.
    pub fn wait(self) {
        let _ = self.supervisor.join();
    }
}

/// Starts a transcode using the resolved encoder binary.
///
/// Returns once the process is spawned; progress, warnings, and the final
/// outcome are delivered through `dispatcher` from a supervisor thread. Spawn
/// failure is the only error reported by return value.
pub fn transcode(
    params: &TranscodeParams,
    dispatcher: EventDispatcher,
) -> CoreResult<TranscodeHandle> {
    let encoder = resolve_ffmpeg()?;
    transcode_with_encoder(&encoder, params, dispatcher)
}

/// Starts a transcode with an explicitly chosen encoder binary.
pub fn transcode_with_encoder(
    encoder: &Path,
    params: &TranscodeParams,
    dispatcher: EventDispatcher,
) -> CoreResult<TranscodeHandle> {
    let output_path = derive_output_path(&params.input_path, params.quality);
    let args = build_encoder_args(params, &output_path);

    log::info!(
        "Starting transcode: {} -> {} (q:v {})",
        params.input_path,
        output_path,
        params.quality
    );

    let mut command = Command::new(encoder);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    log::debug!("Encoder command: {command:?}");

    let child = SharedChild::spawn(&mut command)
        .map_err(|e| CoreError::EncoderSpawn(format!("{}: {e}", encoder.display())))?;
    let child = Arc::new(child);
    let cancelled = Arc::new(AtomicBool::new(false));

    let supervisor = thread::spawn({
        let child = Arc::clone(&child);
        let cancelled = Arc::clone(&cancelled);
        move || {
            let mut scraper = ProgressScraper::new(&dispatcher);

            if let Some(stderr) = child.take_stderr() {
                let mut reader = BufReader::new(stderr);
                let mut record = Vec::new();
                loop {
                    record.clear();
                    match read_record(&mut reader, &mut record) {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {
                            let line = String::from_utf8_lossy(&record);
                            scraper.scan_line(line.trim_end_matches(['\r', '\n']));
                        }
                    }
                }
            }

            match child.wait() {
                Ok(status) if status.success() => {
                    log::info!("Transcode finished successfully");
                    dispatcher.emit(TranscodeEvent::Completed);
                }
                Ok(status) => {
                    let message = if cancelled.load(Ordering::Relaxed) {
                        "transcode cancelled".to_string()
                    } else {
                        match status.code() {
                            Some(code) => format!("encoder exited with status {code}"),
                            None => "encoder terminated by signal".to_string(),
                        }
                    };
                    log::error!("Transcode failed: {message}");
                    dispatcher.emit(TranscodeEvent::Failed { message });
                }
                Err(e) => {
                    let message = format!("failed to wait for encoder: {e}");
                    log::error!("{message}");
                    dispatcher.emit(TranscodeEvent::Failed { message });
                }
            }
        }
    });

    Ok(TranscodeHandle {
        child,
        cancelled,
        supervisor,
        output_path: PathBuf::from(output_path),
    })
}
