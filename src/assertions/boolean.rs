use crate::runner::test_case::TestCase;

pub fn assert_true(test: &mut TestCase, value: bool, expression: &str, line: u32) -> bool {
    if !value {
        test.record_failure(
            format!("{} expected to be true. Actual false", expression),
            Some(line),
        );
    }
    value
}

pub fn assert_false(test: &mut TestCase, value: bool, expression: &str, line: u32) -> bool {
    if value {
        test.record_failure(
            format!("{} expected to be false. Actual true", expression),
            Some(line),
        );
    }
    !value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_passes() {
        let mut test = TestCase::new("True");
        assert!(assert_true(&mut test, true, "1 == 1", 3));
        assert!(test.failures().is_empty());
    }

    #[test]
    fn test_true_fails_with_expression_text() {
        let mut test = TestCase::new("True");
        assert!(!assert_true(&mut test, false, "1 == 2", 3));
        assert_eq!(
            test.failures()[0].lines(),
            ["Line: 3", "1 == 2 expected to be true. Actual false"]
        );
    }

    #[test]
    fn test_false_passes() {
        let mut test = TestCase::new("False");
        assert!(assert_false(&mut test, false, "a == b", 5));
        assert!(test.failures().is_empty());
    }

    #[test]
    fn test_false_fails_with_expression_text() {
        let mut test = TestCase::new("False");
        assert!(!assert_false(&mut test, true, "a != b", 5));
        assert_eq!(
            test.failures()[0].lines(),
            ["Line: 5", "a != b expected to be false. Actual true"]
        );
    }
}
