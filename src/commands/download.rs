use crate::core::command::{self, ArgumentVector, DownloadOptions, DownloadRequest};
use crate::core::config::Config;
use crate::core::runner::ExecutionOutcome;
use crate::core::worker::{self, RunEvent};
use crate::error::Result;
use crate::ui::controls::{ControlsGuard, InputControls, Unattended};
use crate::ui::log_view::{LogFormat, LogView};
use crate::utils::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// One-shot download from the command line.
pub fn download(
    url: &str,
    directory: Option<PathBuf>,
    options: DownloadOptions,
    format: LogFormat,
) -> Result<ExecutionOutcome> {
    let directory = match directory {
        Some(dir) => dir,
        None => Config::load()?.default_download_dir,
    };

    let request = DownloadRequest::new(url.trim(), directory, options)?;
    let mut view = LogView::stdout(format);

    execute(&request, &Unattended, &mut view)
}

/// Run `request` on a background worker while this thread renders its events.
///
/// `controls` stay disabled for the whole run and are re-enabled whatever the
/// outcome. Validation errors are returned before anything is launched.
pub fn execute<C, W>(
    request: &DownloadRequest,
    controls: &C,
    view: &mut LogView<W>,
) -> Result<ExecutionOutcome>
where
    C: InputControls + ?Sized,
    W: Write,
{
    fs::check_target_dir(request.directory())?;
    execute_argv(request, command::build(request), controls, view)
}

/// Same as [`execute`] with an already built command line.
///
/// If the view stops accepting output the worker is still drained to its
/// outcome before the write error is returned, so no run is left detached.
pub(crate) fn execute_argv<C, W>(
    request: &DownloadRequest,
    argv: ArgumentVector,
    controls: &C,
    view: &mut LogView<W>,
) -> Result<ExecutionOutcome>
where
    C: InputControls + ?Sized,
    W: Write,
{
    let _guard = ControlsGuard::new(controls);
    view.message(&format!("Starting download for: {}", request.url()))?;
    view.message(&format!("Saving to: {}", request.directory().display()))?;

    info!(url = request.url(), "starting download");
    let mut handle = worker::spawn(argv)?;

    loop {
        let Some(event) = handle.events().next() else {
            return Ok(worker::worker_lost());
        };

        if let Err(e) = view.event(&event) {
            let outcome = match event {
                RunEvent::Finished { outcome } => outcome,
                RunEvent::Line { .. } => handle.wait(),
            };
            warn!(?outcome, error = %e, "log output failed, download drained");
            return Err(e);
        }

        if let RunEvent::Finished { outcome } = event {
            info!(?outcome, lines = view.line_count(), "download finished");
            return Ok(outcome);
        }
    }
}
