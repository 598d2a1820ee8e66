use std::fmt;

const INDENT_UNIT: &str = "  ";

/// Nesting depth used when rendering failure blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    level: usize,
}

impl Indent {
    pub fn new(level: usize) -> Self {
        Self { level }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn increase(self) -> Self {
        Self {
            level: self.level + 1,
        }
    }

    /// Steps out one level; stays at zero once reached.
    pub fn decrease(self) -> Self {
        Self {
            level: self.level.saturating_sub(1),
        }
    }

    pub fn prefix(&self) -> String {
        INDENT_UNIT.repeat(self.level)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level {
            f.write_str(INDENT_UNIT)?;
        }
        Ok(())
    }
}
