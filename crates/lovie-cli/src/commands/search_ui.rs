use indicatif::{ProgressBar, ProgressStyle};
use movie_log_core::SearchState;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a search is in flight; structured logs instead when
/// not attached to a terminal.
pub struct SearchUI {
    spinner: ProgressBar,
    interactive: bool,
}

impl SearchUI {
    pub fn new() -> Self {
        let interactive = is_interactive();
        let spinner = if interactive {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        Self { spinner, interactive }
    }

    pub fn start(&self, query: &str) {
        if self.interactive {
            self.spinner.set_message(format!("Searching for \"{}\"...", query));
            self.spinner.enable_steady_tick(Duration::from_millis(80));
        } else {
            tracing::info!(operation = "search", query = %query, "Search started");
        }
    }

    pub fn finish(&self, state: &SearchState) {
        if self.interactive {
            self.spinner.finish_and_clear();
        } else {
            let outcome = match state {
                SearchState::Success { .. } => "success",
                SearchState::Error { .. } => "error",
                SearchState::Loading { .. } => "loading",
                SearchState::Idle => "canceled",
            };
            tracing::info!(
                operation = "search",
                outcome = outcome,
                results = state.movies().len(),
                "Search finished"
            );
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
