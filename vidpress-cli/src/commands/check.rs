// vidpress-cli/src/commands/check.rs
//
// The `check` command: print a path's classification and reflect it in the
// process exit code.

use crate::cli::CheckArgs;

use owo_colors::OwoColorize;
use std::process;
use vidpress_core::{CoreResult, VideoPathClass, classify_video_path};

pub fn run_check(args: &CheckArgs) -> CoreResult<()> {
    match classify_video_path(&args.path) {
        VideoPathClass::Valid => {
            println!("{}", "VALID".green().bold());
            Ok(())
        }
        VideoPathClass::InvalidExtension => {
            // The printed classification is the whole report; exit directly
            // so main does not log the same outcome again as an error.
            println!("{}", "INVALID_EXTENSION".red().bold());
            process::exit(2);
        }
    }
}
