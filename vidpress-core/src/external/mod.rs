//! Integration with the external encoder executable.

pub mod ffmpeg;

pub use ffmpeg::{
    EncoderQuality, FFMPEG_PATH_ENV, TranscodeHandle, TranscodeParams, derive_output_path,
    resolve_ffmpeg, transcode, transcode_with_encoder,
};
