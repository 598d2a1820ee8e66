use crate::runner::reporter::Reporter;
use crate::runner::test_case::Outcome;

/// Aggregate over one process run: how many tests started and which failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    run: usize,
    failed: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_started(&mut self) {
        self.run += 1;
    }

    pub fn test_finished(&mut self, name: &str, outcome: Outcome) {
        if outcome == Outcome::Failure {
            self.failed.push(name.to_string());
        }
    }

    pub fn run_count(&self) -> usize {
        self.run
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn failed_tests(&self) -> &[String] {
        &self.failed
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn print_summary(&self, reporter: &mut dyn Reporter) {
        reporter.on_summary(self);
    }
}
