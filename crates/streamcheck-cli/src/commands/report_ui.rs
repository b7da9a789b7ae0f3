use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use streamcheck_sources::ProgressReporter;

/// Page progress for a report run.
///
/// Draws an indicatif bar on stderr when attached to a terminal; otherwise the
/// bar stays hidden and page progress goes to the structured log.
pub struct ReportUI {
    bar: ProgressBar,
    interactive: bool,
}

impl ReportUI {
    pub fn new(username: &str, enabled: bool) -> Self {
        let interactive = enabled && is_interactive();
        let bar = if interactive {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} pages {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_message(format!("{}'s watchlist", username));

        if !interactive {
            tracing::debug!(
                operation = "ui_init",
                mode = "non_interactive",
                "Running in non-interactive mode - progress bar disabled, using structured logging"
            );
        }

        Self { bar, interactive }
    }
}

impl ProgressReporter for ReportUI {
    fn start(&self, total: u64) {
        self.bar.set_length(total);
        if !self.interactive {
            tracing::info!(
                operation = "progress",
                total = total,
                "Fetching remaining watchlist pages"
            );
        }
    }

    fn tick(&self) {
        self.bar.inc(1);
        if !self.interactive {
            tracing::info!(
                operation = "progress",
                current = self.bar.position(),
                total = self.bar.length().unwrap_or(0),
                "Watchlist page done"
            );
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
