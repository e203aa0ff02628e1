//! Background execution of a download.
//!
//! The runner blocks, so it gets its own thread. Lines and the final outcome
//! travel over a single channel; the receiving side drains it on its own loop
//! and is the only place that touches presentation state.

use crate::core::command::ArgumentVector;
use crate::core::runner::{self, ExecutionOutcome};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

const WORKER_THREAD_NAME: &str = "gallery-dl-runner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    Line { line: String },
    Finished { outcome: ExecutionOutcome },
}

pub struct DownloadHandle {
    events: Receiver<RunEvent>,
    thread: Option<JoinHandle<()>>,
    finished: bool,
}

/// Start `argv` on a dedicated thread. Events arrive in emission order and
/// exactly one [`RunEvent::Finished`] closes the stream.
pub fn spawn(argv: ArgumentVector) -> Result<DownloadHandle> {
    let (tx, rx) = mpsc::channel();

    let thread = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let outcome = runner::run(&argv, |line| {
                // A dropped receiver only means nobody is watching anymore.
                let _ = tx.send(RunEvent::Line { line });
            });
            debug!(?outcome, "worker finished");
            let _ = tx.send(RunEvent::Finished { outcome });
        })?;

    Ok(DownloadHandle {
        events: rx,
        thread: Some(thread),
        finished: false,
    })
}

impl DownloadHandle {
    /// Blocking iterator over the remaining events, ending after `Finished`.
    pub fn events(&mut self) -> Events<'_> {
        Events { handle: self }
    }

    /// Drain all remaining events, returning the outcome.
    pub fn wait(mut self) -> ExecutionOutcome {
        let mut outcome = None;
        for event in self.events() {
            if let RunEvent::Finished { outcome: o } = event {
                outcome = Some(o);
            }
        }
        outcome.unwrap_or_else(worker_lost)
    }

    fn next_event(&mut self) -> Option<RunEvent> {
        if self.finished {
            return None;
        }

        let event = match self.events.recv() {
            Ok(event) => event,
            // Sender gone without a Finished event: the worker panicked.
            Err(_) => RunEvent::Finished {
                outcome: worker_lost(),
            },
        };

        if matches!(event, RunEvent::Finished { .. }) {
            self.finished = true;
            self.join();
        }
        Some(event)
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("download worker panicked");
            }
        }
    }
}

pub struct Events<'a> {
    handle: &'a mut DownloadHandle,
}

impl Iterator for Events<'_> {
    type Item = RunEvent;

    fn next(&mut self) -> Option<RunEvent> {
        self.handle.next_event()
    }
}

pub(crate) fn worker_lost() -> ExecutionOutcome {
    ExecutionOutcome::LaunchFailure {
        message: "download worker stopped unexpectedly".to_string(),
    }
}
