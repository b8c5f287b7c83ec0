use crate::ports::outbound::{ProgressEvent, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

const PROGRESS_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the JSON result on stdout.
/// Uses indicatif for rich progress bar display.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self
            .progress_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)
                    .expect("Failed to set progress bar template")
                    .progress_chars("=>-"),
            );
            *pb_option = Some(pb.clone());
            pb
        }
    }

    fn finish_progress_bar(&self) {
        let pb_option = self
            .progress_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = pb_option.as_ref() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report_progress(&self, event: &ProgressEvent) {
        let pb = self.get_or_create_progress_bar(event.total);
        pb.set_position(event.completed as u64);
        pb.set_message(event.message.clone());
    }

    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_error(&self, message: &str) {
        // Keep the bar alive: lookup failures are reported mid-run
        let pb_option = self
            .progress_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match pb_option.as_ref() {
            Some(pb) if !pb.is_finished() => pb.println(message),
            _ => eprintln!("{}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}
