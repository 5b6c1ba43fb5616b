use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::binding::{FetchBinding, FetchSnapshot};

/// Spinner shown on stderr while a request is in flight.
///
/// Hidden when disabled (JSON output, non-interactive runs) so nothing but
/// the rendered result reaches the terminal.
pub struct LoadingSpinner {
    bar: ProgressBar,
}

impl LoadingSpinner {
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("progress bar template is a valid static string");
        bar.set_style(spinner_style);
        bar.set_message(style(message).cyan().to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

/// Wait for `binding` to settle, spinning with `message` while it loads.
pub async fn wait_with_spinner<T>(
    binding: &FetchBinding<T>,
    message: &str,
    enabled: bool,
) -> FetchSnapshot<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    if !binding.snapshot().loading {
        return binding.snapshot();
    }
    let spinner = LoadingSpinner::start(message, enabled);
    let snapshot = binding.settled().await;
    spinner.finish();
    snapshot
}
