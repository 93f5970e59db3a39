//! Core library for video output-size estimation and transcode orchestration.
//!
//! This crate provides the pieces a front end needs around an external ffmpeg
//! binary: predicted output sizes per quality tier, input path classification,
//! human-readable byte formatting, and a non-blocking transcode runner that
//! scrapes the encoder's diagnostic output into progress events.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidpress_core::{
//!     EncoderQuality, EventDispatcher, TranscodeParams, VideoPathClass,
//!     classify_video_path, transcode,
//! };
//!
//! let input = "/videos/clip.mov";
//! assert_eq!(classify_video_path(input), VideoPathClass::Valid);
//!
//! let params = TranscodeParams {
//!     input_path: input.to_string(),
//!     quality: EncoderQuality(55),
//! };
//! let handle = transcode(&params, EventDispatcher::new()).unwrap();
//! handle.wait();
//! ```

pub mod error;
pub mod estimate;
pub mod events;
pub mod external;
pub mod utils;

// Re-exports for public API
pub use error::{CoreError, CoreResult};
pub use estimate::{MAX_QUALITY_TIER, MIN_QUALITY_TIER, QualityTier, estimate_size};
pub use events::{EventDispatcher, EventHandler, TranscodeEvent};
pub use external::{
    EncoderQuality, FFMPEG_PATH_ENV, TranscodeHandle, TranscodeParams, derive_output_path,
    resolve_ffmpeg, transcode, transcode_with_encoder,
};
pub use utils::{VideoPathClass, classify_video_path, format_bytes, parse_ffmpeg_time};
