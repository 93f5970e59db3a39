// vidpress-cli/src/output.rs
//
// Terminal progress reporting: an EventHandler that drives an indicatif bar
// from transcode events.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;
use std::time::Duration;
use vidpress_core::{EventHandler, TranscodeEvent};

pub struct CliProgressReporter {
    bar: ProgressBar,
    failure: Mutex<Option<String>>,
}

impl CliProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}").unwrap(),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar,
            failure: Mutex::new(None),
        }
    }

    /// The failure message, if the job ended with a `Failed` event.
    pub fn take_failure(&self) -> Option<String> {
        self.failure.lock().unwrap().take()
    }
}

impl EventHandler for CliProgressReporter {
    fn handle(&self, event: &TranscodeEvent) {
        match event {
            TranscodeEvent::Progress { fraction } => {
                // The core reports the fraction unclamped; clamp for display
                // only so a skewed timestamp cannot wrap the bar.
                let percent = (fraction * 100.0).clamp(0.0, 100.0) as u64;
                self.bar.set_position(percent);
            }
            TranscodeEvent::Warning { message } => {
                self.bar
                    .println(format!("{} {message}", "warning:".yellow().bold()));
            }
            TranscodeEvent::Completed => {
                self.bar.set_position(100);
                self.bar
                    .finish_with_message(format!("{}", "done".green().bold()));
            }
            TranscodeEvent::Failed { message } => {
                *self.failure.lock().unwrap() = Some(message.clone());
                self.bar
                    .abandon_with_message(format!("{}", "failed".red().bold()));
            }
        }
    }
}

impl Default for CliProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
