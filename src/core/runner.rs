//! Runs one external tool invocation and streams its merged output.
//!
//! stdout and stderr share the write end of a single pipe, so lines reach the
//! caller in the order the tool wrote them. The exit status is only collected
//! once that pipe reports end-of-stream; waiting earlier could drop output the
//! tool flushed just before exiting.

use crate::core::command::ArgumentVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, BufReader, PipeWriter, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, warn};

/// Terminal classification of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success,
    ToolFailure { code: i32 },
    LaunchFailure { message: String },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionOutcome::Success => Some(0),
            ExecutionOutcome::ToolFailure { code } => Some(*code),
            ExecutionOutcome::LaunchFailure { .. } => None,
        }
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionOutcome::Success => write!(f, "Download completed successfully!"),
            ExecutionOutcome::ToolFailure { code } => {
                write!(f, "Error: gallery-dl exited with code {code}")
            }
            ExecutionOutcome::LaunchFailure { message } => write!(f, "Error: {message}"),
        }
    }
}

/// Run `argv` to completion, handing every output line to `on_line`.
///
/// Blocks the calling thread. Never fails: launch and I/O problems come back
/// as [`ExecutionOutcome::LaunchFailure`] after a diagnostic line has been
/// delivered.
pub fn run<F>(argv: &ArgumentVector, mut on_line: F) -> ExecutionOutcome
where
    F: FnMut(String),
{
    let program = argv.program();
    debug!(%argv, "launching external tool");

    let (reader, writer) = match io::pipe() {
        Ok(pair) => pair,
        Err(e) => return launch_failure(program, &e, &mut on_line),
    };

    let mut child = match spawn_merged(argv, writer) {
        Ok(child) => child,
        Err(e) => return launch_failure(program, &e, &mut on_line),
    };

    match stream_lines(reader, &mut on_line) {
        Ok(count) => debug!(lines = count, "output stream closed"),
        Err(e) => {
            reap(&mut child);
            return launch_failure(program, &e, &mut on_line);
        }
    }

    match child.wait() {
        Ok(status) => {
            debug!(%status, "external tool exited");
            classify(status)
        }
        Err(e) => launch_failure(program, &e, &mut on_line),
    }
}

fn spawn_merged(argv: &ArgumentVector, writer: PipeWriter) -> io::Result<Child> {
    let mut command = Command::new(argv.program());
    command
        .args(argv.args())
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    // `command` owns the parent's write ends and is dropped on return, so the
    // reader sees EOF as soon as the child side closes.
    command.spawn()
}

/// Split `reader` into lines and deliver each one. Returns the number of lines.
///
/// Reads are reassembled across buffer boundaries; `\n` and `\r\n` endings are
/// stripped and a trailing fragment without a newline still counts as a line.
pub fn stream_lines<R, F>(reader: R, on_line: &mut F) -> io::Result<usize>
where
    R: Read,
    F: FnMut(String),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        on_line(String::from_utf8_lossy(&buf).into_owned());
        count += 1;
    }

    Ok(count)
}

fn classify(status: ExitStatus) -> ExecutionOutcome {
    match status.code() {
        Some(0) => ExecutionOutcome::Success,
        Some(code) => ExecutionOutcome::ToolFailure { code },
        None => ExecutionOutcome::ToolFailure {
            code: signal_exit_code(&status),
        },
    }
}

#[cfg(unix)]
fn signal_exit_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal).unwrap_or(-1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: &ExitStatus) -> i32 {
    -1
}

fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "kill after read failure");
    }
    if let Err(e) = child.wait() {
        debug!(error = %e, "wait after read failure");
    }
}

fn launch_failure<F>(program: &str, error: &io::Error, on_line: &mut F) -> ExecutionOutcome
where
    F: FnMut(String),
{
    warn!(program, error = %error, "external tool did not run to completion");
    on_line(format!("Error executing {program}: {error}"));
    ExecutionOutcome::LaunchFailure {
        message: format!("could not run {program}: {error}"),
    }
}
