//! Download progress reporting.
//!
//! A [`DownloadProgress`] sink is handed to the fetcher for one download.
//! [`ConsoleProgress`] draws an `indicatif` bar once the size is known to be
//! worth showing; [`NoProgress`] discards everything.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Downloads smaller than this are not worth a progress bar.
pub const PROGRESS_THRESHOLD: u64 = 1024 * 1024;

pub trait DownloadProgress {
    /// Called with the total size, when known, and the bytes written so far.
    fn update(&mut self, total: Option<u64>, downloaded: u64);

    /// Called once the body has been fully written.
    fn finish(&mut self) {}
}

#[derive(Debug, Default)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {
    fn update(&mut self, _total: Option<u64>, _downloaded: u64) {}
}

pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
    draw_target: fn() -> ProgressDrawTarget,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            draw_target: ProgressDrawTarget::stderr,
        }
    }

    /// A reporter that tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            draw_target: ProgressDrawTarget::hidden,
        }
    }

    #[cfg(test)]
    fn is_started(&self) -> bool {
        self.bar.is_some()
    }

    #[cfg(test)]
    fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|bar| bar.position())
    }

    fn create_bar(&self, total: u64) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(Some(total), (self.draw_target)());
        let style = ProgressStyle::with_template("{bytes}/{total_bytes} {bar:40} {percent:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("▓░");
        bar.set_style(style);
        bar
    }
}

impl DownloadProgress for ConsoleProgress {
    fn update(&mut self, total: Option<u64>, downloaded: u64) {
        let total = match total {
            Some(total) if total >= PROGRESS_THRESHOLD => total,
            _ => return,
        };

        if self.bar.is_none() {
            self.bar = Some(self.create_bar(total));
        }

        if let Some(bar) = &self.bar {
            bar.set_position(downloaded.min(total));
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}
