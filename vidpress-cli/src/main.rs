// vidpress-cli/src/main.rs
//
// Entry point for the vidpress CLI: initializes logging, parses arguments,
// dispatches to the command implementations, and maps errors to the process
// exit code.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Encode(args) => commands::encode::run_encode(&args),
        Commands::Estimate(args) => commands::estimate::run_estimate(&args),
        Commands::Check(args) => commands::check::run_check(&args),
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}
