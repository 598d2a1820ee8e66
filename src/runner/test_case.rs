use crate::report::Failure;
use crate::runner::reporter::Reporter;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Inconclusive,
    Success,
    Failure,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Inconclusive => "InConclusive",
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }

    /// The state after moving toward `next`. `Failure` absorbs every transition.
    pub fn transition(self, next: Outcome) -> Outcome {
        match self {
            Outcome::Failure => Outcome::Failure,
            _ => next,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct TestCase {
    name: String,
    outcome: Outcome,
    failures: Vec<Failure>,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Inconclusive,
            failures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    fn set_outcome(&mut self, next: Outcome) {
        self.outcome = self.outcome.transition(next);
    }

    /// Records a failure, prefixed with `Line: <n>` when the call site is known.
    pub fn record_failure(&mut self, detail: impl Into<Failure>, source_line: Option<u32>) {
        let detail = detail.into();
        let failure = match source_line {
            Some(line) => Failure::at_line(line).append(detail),
            None => detail,
        };
        tracing::debug!(test = %self.name, lines = ?failure.lines(), "failure recorded");
        self.failures.push(failure);
        self.set_outcome(Outcome::Failure);
    }

    /// Runs `body` once and finalizes the outcome. Errors returned by the body
    /// and panics raised inside it are recorded as failures, never propagated.
    pub fn run<F>(&mut self, body: F, reporter: &mut dyn Reporter)
    where
        F: FnOnce(&mut TestCase) -> anyhow::Result<()>,
    {
        reporter.on_test_start(&self.name);
        tracing::debug!(test = %self.name, "test body started");

        let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self)));

        match result {
            Ok(Ok(())) => self.set_outcome(Outcome::Success),
            Ok(Err(e)) => self.record_failure(format!("Unexpected exception: {:#}", e), None),
            Err(payload) => match panic_message(&*payload) {
                Some(message) => {
                    self.record_failure(format!("Unexpected exception: {}", message), None)
                }
                None => self.record_failure("Unknown exception", None),
            },
        }

        tracing::debug!(test = %self.name, outcome = %self.outcome, "test body finished");
        reporter.on_test_finish(&self.name, self.outcome, &self.failures);
    }
}

/// Extracts the message of a panic raised with a string or error payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_string())
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.clone())
    } else if let Some(e) = payload.downcast_ref::<anyhow::Error>() {
        Some(format!("{:#}", e))
    } else {
        payload
            .downcast_ref::<Box<dyn std::error::Error + Send + Sync>>()
            .map(|e| e.to_string())
    }
}
