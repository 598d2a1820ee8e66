use crate::report::indent::Indent;
use std::fmt::Display;

pub const SAME_VALUE_HEADER: &str = "Expected different values but got the same";

/// One recorded problem, kept as the lines it prints as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failure {
    lines: Vec<String>,
}

impl Failure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_line(line: u32) -> Self {
        Self {
            lines: vec![format!("Line: {}", line)],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn append(mut self, other: Failure) -> Self {
        self.lines.extend(other.lines);
        self
    }

    /// Renders every line behind `indent`, one per row.
    pub fn render(&self, indent: Indent) -> String {
        let prefix = indent.prefix();
        let mut result = String::new();
        for line in &self.lines {
            result.push_str(&prefix);
            result.push_str(line);
            result.push('\n');
        }
        result
    }
}

impl From<String> for Failure {
    fn from(line: String) -> Self {
        Self { lines: vec![line] }
    }
}

impl From<&str> for Failure {
    fn from(line: &str) -> Self {
        Self::from(line.to_string())
    }
}

impl From<Vec<String>> for Failure {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Builds the expected/actual pair reported by an equality check.
#[derive(Debug, Clone, Default)]
pub struct MismatchFailure {
    lines: Vec<String>,
}

impl MismatchFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expected<T: Display + ?Sized>(mut self, value: &T) -> Self {
        self.lines.push(format!("Expected: {}", value));
        self
    }

    pub fn actual<T: Display + ?Sized>(mut self, value: &T) -> Self {
        self.lines.push(format!("Actual: {}", value));
        self
    }

    pub fn build(self) -> Failure {
        Failure::from(self.lines)
    }
}

impl From<MismatchFailure> for Failure {
    fn from(builder: MismatchFailure) -> Self {
        builder.build()
    }
}

/// Builds the report of an inequality check that saw one value twice.
#[derive(Debug, Clone, Default)]
pub struct SameFailure {
    lines: Vec<String>,
}

impl SameFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: Display + ?Sized>(mut self, value: &T) -> Self {
        self.lines.push(format!("Value: {}", value));
        self
    }

    pub fn build(self) -> Failure {
        Failure::from(SAME_VALUE_HEADER).append(Failure::from(self.lines))
    }
}

impl From<SameFailure> for Failure {
    fn from(builder: SameFailure) -> Self {
        builder.build()
    }
}
