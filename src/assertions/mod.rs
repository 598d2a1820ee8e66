//! Checks invoked from a test body.
//!
//! A violated check records a failure on the running [`TestCase`] together
//! with the line of the call site, and returns `false`. The body keeps going.
//!
//! [`TestCase`]: crate::runner::test_case::TestCase

pub mod boolean;
pub mod equality;
pub mod throws;

pub use boolean::{assert_false, assert_true};
pub use equality::{assert_equal, assert_not_equal};
pub use throws::{assert_throws, raises, ErrValue, Evaluated, PlainValue};

/// Fails with an expected/actual pair when the values differ.
#[macro_export]
macro_rules! is_eq {
    ($test:expr, $expected:expr, $actual:expr $(,)?) => {
        $crate::assertions::assert_equal($test, &$expected, &$actual, line!())
    };
}

/// Fails with the shared value when both sides are equal.
#[macro_export]
macro_rules! is_not_eq {
    ($test:expr, $expected:expr, $actual:expr $(,)?) => {
        $crate::assertions::assert_not_equal($test, &$expected, &$actual, line!())
    };
}

#[macro_export]
macro_rules! is_true {
    ($test:expr, $expression:expr $(,)?) => {
        $crate::assertions::assert_true($test, $expression, stringify!($expression), line!())
    };
}

#[macro_export]
macro_rules! is_false {
    ($test:expr, $expression:expr $(,)?) => {
        $crate::assertions::assert_false($test, $expression, stringify!($expression), line!())
    };
}

/// Evaluates the expression and fails unless it panics or returns `Err`.
/// Any other value, of any type, counts as completing normally.
#[macro_export]
macro_rules! throws {
    ($test:expr, $expression:expr $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::assertions::{ErrValue as _, PlainValue as _};
        let raised = $crate::assertions::raises(|| {
            (&$crate::assertions::Evaluated(&$expression)).is_raised()
        });
        $crate::assertions::assert_throws($test, raised, stringify!($expression), line!())
    }};
}
