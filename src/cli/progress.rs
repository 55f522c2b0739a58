use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::pipeline::RequestState;

/// Show a spinner while the observed request is in flight.
///
/// The task finishes once the request settles or the pipeline goes away.
pub fn spawn_progress(mut updates: watch::Receiver<RequestState>, quiet: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;

        loop {
            let (in_flight, settled) = {
                let state = updates.borrow_and_update();
                (state.is_in_flight(), state.is_settled())
            };

            if in_flight && spinner.is_none() && !quiet {
                spinner = Some(create_spinner("Fetching transcript and generating summary..."));
            }
            if !in_flight {
                if let Some(spinner) = spinner.take() {
                    spinner.finish_and_clear();
                }
            }
            if settled || updates.changed().await.is_err() {
                break;
            }
        }

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    })
}

fn create_spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(message.to_string());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
