// vidpress-cli/src/commands/encode.rs
//
// The `encode` command: gate the input through the extension check, show a
// size prediction when one is available, then run the transcode with a
// progress bar until the job reports its outcome.

use crate::cli::EncodeArgs;
use crate::output::CliProgressReporter;

use owo_colors::OwoColorize;
use std::fs;
use std::sync::Arc;
use vidpress_core::{
    CoreError, CoreResult, EncoderQuality, EventDispatcher, QualityTier, TranscodeParams,
    VideoPathClass, classify_video_path, estimate_size, format_bytes, transcode,
};

pub fn run_encode(args: &EncodeArgs) -> CoreResult<()> {
    if classify_video_path(&args.input_path) != VideoPathClass::Valid {
        return Err(CoreError::InvalidPath(format!(
            "unsupported video extension: {}",
            args.input_path
        )));
    }

    print_size_prediction(args);

    let reporter = Arc::new(CliProgressReporter::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(reporter.clone());

    let params = TranscodeParams {
        input_path: args.input_path.clone(),
        quality: EncoderQuality(args.quality),
    };
    let handle = transcode(&params, dispatcher)?;
    println!(
        "{} {}",
        "Writing".bold(),
        handle.output_path().display()
    );
    handle.wait();

    match reporter.take_failure() {
        Some(message) => Err(CoreError::TranscodeFailed(message)),
        None => Ok(()),
    }
}

/// Prints a predicted output size when the encoder quality happens to fall in
/// the measured tier range. The two quality scales are unrelated, so this is
/// best-effort display only and never affects the encode.
fn print_size_prediction(args: &EncodeArgs) {
    let Ok(metadata) = fs::metadata(&args.input_path) else {
        return;
    };
    let Some(tier) = u8::try_from(args.quality)
        .ok()
        .and_then(|q| QualityTier::new(q).ok())
    else {
        return;
    };

    let predicted = estimate_size(metadata.len(), tier);
    println!(
        "{} {} -> ~{}",
        "Estimated output:".bold(),
        format_bytes(metadata.len()),
        format_bytes(predicted as u64)
    );
}
