// vidpress-cli/src/commands/estimate.rs
//
// The `estimate` command: predict the output size for a quality tier from
// either a file's on-disk size or a raw byte count.

use crate::cli::EstimateArgs;

use std::fs;
use vidpress_core::{CoreError, CoreResult, QualityTier, estimate_size, format_bytes};

pub fn run_estimate(args: &EstimateArgs) -> CoreResult<()> {
    let tier = QualityTier::new(args.tier)?;

    let original = match (&args.input_path, args.size) {
        (Some(path), _) => fs::metadata(path)?.len(),
        (None, Some(bytes)) => bytes,
        (None, None) => {
            return Err(CoreError::InvalidPath(
                "provide --input or --size".to_string(),
            ));
        }
    };

    let predicted = estimate_size(original, tier);
    println!("Original:  {}", format_bytes(original));
    println!(
        "Estimated: {} (tier {tier}, ratio {:.4})",
        format_bytes(predicted as u64),
        tier.ratio()
    );
    Ok(())
}
