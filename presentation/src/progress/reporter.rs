//! Progress reporting for pipeline execution

use indicatif::{ProgressBar, ProgressStyle};
use pagesage_application::ports::progress::QueryProgress;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a pipeline run with a terminal spinner.
///
/// Used in single-query mode: shows what the pipeline is waiting on and
/// clears itself before the formatted result is printed.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut guard = self.spinner.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn stop(&self) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryProgress for ProgressReporter {
    fn on_context_start(&self, source: &str) {
        if source != "none" {
            self.start(format!("Fetching context from {}", source));
        }
    }

    fn on_context_ready(&self, _bytes: usize) {
        self.stop();
    }

    fn on_answer_start(&self) {
        self.start("Waiting for answer...".to_string());
    }

    fn on_answer_end(&self) {
        self.stop();
    }
}

/// Prints answer chunks to stdout as they stream in.
///
/// Used in chat mode, where the answer should appear while it arrives.
/// `chunks_printed()` tells the caller whether anything was streamed, so
/// non-streaming backends can have their answer printed afterwards.
pub struct SimpleProgress {
    printed: AtomicBool,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self {
            printed: AtomicBool::new(false),
        }
    }

    /// Whether any chunk reached stdout during the run.
    pub fn chunks_printed(&self) -> bool {
        self.printed.load(Ordering::Relaxed)
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryProgress for SimpleProgress {
    fn on_answer_chunk(&self, chunk: &str) {
        self.printed.store(true, Ordering::Relaxed);
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
    }
}
