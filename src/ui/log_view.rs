//! Renders download progress: our own status messages, the tool's output
//! lines and the final outcome, either as plain text or as JSON lines.

use crate::core::runner::ExecutionOutcome;
use crate::core::worker::RunEvent;
use crate::error::Result;
use clap::ValueEnum;
use serde_json::json;
use std::io::{self, Stdout, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

pub struct LogView<W: Write> {
    out: W,
    format: LogFormat,
    lines: usize,
}

impl LogView<Stdout> {
    pub fn stdout(format: LogFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> LogView<W> {
    pub fn new(out: W, format: LogFormat) -> Self {
        Self {
            out,
            format,
            lines: 0,
        }
    }

    /// Number of tool output lines shown so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        match self.format {
            LogFormat::Text => writeln!(self.out, "{text}")?,
            LogFormat::Json => {
                let entry = json!({ "event": "message", "message": text });
                writeln!(self.out, "{entry}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn event(&mut self, event: &RunEvent) -> Result<()> {
        match (self.format, event) {
            (LogFormat::Json, event) => {
                if matches!(event, RunEvent::Line { .. }) {
                    self.lines += 1;
                }
                serde_json::to_writer(&mut self.out, event)?;
                writeln!(self.out)?;
            }
            (LogFormat::Text, RunEvent::Line { line }) => {
                self.lines += 1;
                writeln!(self.out, "{line}")?;
            }
            (LogFormat::Text, RunEvent::Finished { outcome }) => self.finish_text(outcome)?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish_text(&mut self, outcome: &ExecutionOutcome) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(format: LogFormat, events: &[RunEvent]) -> String {
        let mut view = LogView::new(Vec::new(), format);
        view.message("Starting download for: https://example.com/g/1")
            .unwrap();
        for event in events {
            view.event(event).unwrap();
        }
        String::from_utf8(view.into_inner()).unwrap()
    }

    fn line(text: &str) -> RunEvent {
        RunEvent::Line {
            line: text.to_string(),
        }
    }

    #[test]
    fn test_text_output() {
        let output = render(
            LogFormat::Text,
            &[
                line("a"),
                line("b"),
                RunEvent::Finished {
                    outcome: ExecutionOutcome::ToolFailure { code: 2 },
                },
            ],
        );
        assert_eq!(
            output,
            "Starting download for: https://example.com/g/1\na\nb\n\nError: gallery-dl exited with code 2\n"
        );
    }

    #[test]
    fn test_json_output() {
        let output = render(
            LogFormat::Json,
            &[
                line("a"),
                RunEvent::Finished {
                    outcome: ExecutionOutcome::Success,
                },
            ],
        );
        let entries: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["event"], "message");
        assert_eq!(entries[1]["line"], "a");
        assert_eq!(entries[2]["outcome"]["status"], "success");
    }

    #[test]
    fn test_line_count() {
        let mut view = LogView::new(Vec::new(), LogFormat::Text);
        view.message("header").unwrap();
        view.event(&line("one")).unwrap();
        view.event(&line("two")).unwrap();
        assert_eq!(view.line_count(), 2);
    }
}
