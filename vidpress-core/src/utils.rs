//! Utility functions for path classification, formatting, and time parsing.

/// Extensions accepted as video input, matched case-sensitively against the
/// end of the path.
const VIDEO_EXTENSIONS: [&str; 18] = [
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "mpg", "mpeg", "m4v",
    "3gp", "3g2", "swf", "vob", "m2v", "ts", "mts", "m2ts",
];

/// Classification of a candidate input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPathClass {
    Valid,
    InvalidExtension,
}

/// Classifies a path by its suffix against the video extension allow-list.
///
/// This is purely a string check: the file is never opened or stat'd, and
/// matching is case-sensitive (`a.MP4` is rejected). Paths with no extension
/// classify as `InvalidExtension`.
#[must_use]
pub fn classify_video_path(path: &str) -> VideoPathClass {
    let is_valid = VIDEO_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(&format!(".{ext}")));

    if is_valid {
        VideoPathClass::Valid
    } else {
        VideoPathClass::InvalidExtension
    }
}

/// Formats bytes with binary units (B, KiB, MiB, ... YiB), one decimal place.
///
/// Unit advancement rounds to one decimal before comparing against 1024, so
/// a value that rounds up to exactly 1024.0 rolls over to the next unit.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const THRESH: f64 = 1024.0;

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    const UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
    let mut value = bytes as f64;
    let mut unit = 0;

    loop {
        value /= THRESH;
        if (value * 10.0).round() / 10.0 < THRESH || unit == UNITS.len() - 1 {
            break;
        }
        unit += 1;
    }

    format!("{value:.1} {}", UNITS[unit])
}

/// Parses an FFmpeg time string (H:MM:SS.ss) to seconds. Returns None if the
/// string does not have three numeric components. Component ranges are not
/// validated; FFmpeg itself emits values like "00:60:00".
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}
