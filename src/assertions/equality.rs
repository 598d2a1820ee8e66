use crate::report::{MismatchFailure, SameFailure};
use crate::runner::test_case::TestCase;
use std::fmt::Display;

pub fn assert_equal<E, A>(test: &mut TestCase, expected: &E, actual: &A, line: u32) -> bool
where
    E: PartialEq<A> + Display + ?Sized,
    A: Display + ?Sized,
{
    if expected.ne(actual) {
        let failure = MismatchFailure::new().expected(expected).actual(actual);
        test.record_failure(failure, Some(line));
        return false;
    }
    true
}

pub fn assert_not_equal<E, A>(test: &mut TestCase, expected: &E, actual: &A, line: u32) -> bool
where
    E: PartialEq<A> + Display + ?Sized,
    A: ?Sized,
{
    if expected.eq(actual) {
        test.record_failure(SameFailure::new().value(expected), Some(line));
        return false;
    }
    true
}
