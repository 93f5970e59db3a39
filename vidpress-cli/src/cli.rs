// vidpress-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vidpress: video transcoding front end",
    long_about = "Estimates output sizes and drives ffmpeg transcodes via the vidpress-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcodes a video file with the hardware H.264 encoder
    Encode(EncodeArgs),
    /// Estimates the output size for a quality tier
    Estimate(EstimateArgs),
    /// Checks whether a path has a supported video extension
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Input video file
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_PATH")]
    pub input_path: String,

    /// Encoder quality parameter, passed through to ffmpeg as -q:v
    #[arg(short = 'q', long, value_name = "QV", default_value_t = 55)]
    pub quality: u32,
}

#[derive(Parser, Debug)]
pub struct EstimateArgs {
    /// Input video file whose size seeds the estimate
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input_path: Option<String>,

    /// Raw byte count to estimate from instead of a file
    #[arg(long, value_name = "BYTES", conflicts_with = "input_path")]
    pub size: Option<u64>,

    /// Quality tier (40-70, higher keeps more of the input)
    #[arg(short = 't', long, value_name = "TIER", value_parser = clap::value_parser!(u8).range(40..=70))]
    pub tier: u8,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to classify
    #[arg(required = true, value_name = "PATH")]
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_args_parse() {
        let cli = Cli::try_parse_from(["vidpress", "encode", "-i", "clip.mov", "-q", "62"]).unwrap();
        match cli.command {
            Commands::Encode(args) => {
                assert_eq!(args.input_path, "clip.mov");
                assert_eq!(args.quality, 62);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_encode_quality_defaults_to_55() {
        let cli = Cli::try_parse_from(["vidpress", "encode", "--input", "clip.mov"]).unwrap();
        match cli.command {
            Commands::Encode(args) => assert_eq!(args.quality, 55),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_estimate_tier_range_enforced() {
        assert!(Cli::try_parse_from(["vidpress", "estimate", "--size", "1000", "-t", "39"]).is_err());
        assert!(Cli::try_parse_from(["vidpress", "estimate", "--size", "1000", "-t", "71"]).is_err());
        assert!(Cli::try_parse_from(["vidpress", "estimate", "--size", "1000", "-t", "40"]).is_ok());
    }

    #[test]
    fn test_estimate_size_conflicts_with_input() {
        assert!(
            Cli::try_parse_from([
                "vidpress", "estimate", "--size", "1000", "-i", "a.mp4", "-t", "50"
            ])
            .is_err()
        );
    }
}
