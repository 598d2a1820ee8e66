use crate::report::{Failure, Indent};
use crate::runner::summary::RunSummary;
use crate::runner::test_case::Outcome;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, clap::ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled_for_stdout(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Receives lifecycle events from test cases and the run summary.
pub trait Reporter {
    fn on_test_start(&mut self, name: &str);
    fn on_test_finish(&mut self, name: &str, outcome: Outcome, failures: &[Failure]);
    fn on_summary(&mut self, summary: &RunSummary);
}

fn styled_outcome(outcome: Outcome, color: bool) -> String {
    if !color {
        return outcome.label().to_string();
    }
    match outcome {
        Outcome::Success => outcome.label().green().to_string(),
        Outcome::Failure => outcome.label().red().to_string(),
        Outcome::Inconclusive => outcome.label().yellow().to_string(),
    }
}

pub fn format_test_start(name: &str) -> String {
    format!("\nRun      {}\n", name)
}

pub fn format_test_finish(
    name: &str,
    outcome: Outcome,
    failures: &[Failure],
    color: bool,
) -> String {
    let mut result = format!(
        "Finished {}\nStatus   {}\n",
        name,
        styled_outcome(outcome, color)
    );

    let indent = Indent::new(1);
    for failure in failures {
        result.push_str(&failure.render(indent));
        result.push('\n');
    }

    result
}

pub fn format_summary(summary: &RunSummary, color: bool) -> String {
    let mut result = String::from("\n\nSummary\n");
    result.push_str(&format!("  Run:  {}\n", summary.run_count()));

    let fail_count = summary.failure_count();
    if color && fail_count > 0 {
        result.push_str(&format!("  Fail: {}\n", fail_count.red()));
    } else {
        result.push_str(&format!("  Fail: {}\n", fail_count));
    }

    let indent = Indent::new(2);
    for name in summary.failed_tests() {
        if color {
            result.push_str(&format!("{}{}\n", indent, name.red()));
        } else {
            result.push_str(&format!("{}{}\n", indent, name));
        }
    }

    result
}

/// Writes the plain-text report to any `Write` sink.
///
/// The first write error is kept and surfaced by [`TextReporter::into_inner`];
/// later output is dropped so a broken sink never interrupts a run.
pub struct TextReporter<W: Write> {
    out: W,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            error: None,
        }
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write test report: {}", e);
            self.error = Some(e);
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl TextReporter<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn on_test_start(&mut self, name: &str) {
        self.emit(&format_test_start(name));
    }

    fn on_test_finish(&mut self, name: &str, outcome: Outcome, failures: &[Failure]) {
        let text = format_test_finish(name, outcome, failures, self.color);
        self.emit(&text);
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        let text = format_summary(summary, self.color);
        self.emit(&text);
    }
}
