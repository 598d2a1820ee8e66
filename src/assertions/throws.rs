use crate::runner::test_case::TestCase;
use std::panic::{self, AssertUnwindSafe};

/// A borrowed result of the expression under `throws!`.
///
/// Method lookup on `&Evaluated<_>` picks [`ErrValue`] for `Result`s and falls
/// back to [`PlainValue`] for everything else.
pub struct Evaluated<'a, T>(pub &'a T);

pub trait ErrValue {
    fn is_raised(&self) -> bool;
}

impl<T, E> ErrValue for Evaluated<'_, Result<T, E>> {
    fn is_raised(&self) -> bool {
        self.0.is_err()
    }
}

pub trait PlainValue {
    fn is_raised(&self) -> bool;
}

impl<T> PlainValue for &Evaluated<'_, T> {
    fn is_raised(&self) -> bool {
        false
    }
}

/// Runs `f`, treating a panic as raised. Otherwise `f` reports the outcome.
pub fn raises<F>(f: F) -> bool
where
    F: FnOnce() -> bool,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(true)
}

pub fn assert_throws(test: &mut TestCase, raised: bool, expression: &str, line: u32) -> bool {
    if !raised {
        test.record_failure(format!("{} should throw but didn't", expression), Some(line));
    }
    raised
}
