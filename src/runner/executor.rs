use crate::runner::errors::RunnerError;
use crate::runner::reporter::{ColorChoice, Reporter, TextReporter};
use crate::runner::summary::RunSummary;
use crate::runner::test_case::TestCase;
use regex::Regex;
use std::panic;

pub type TestBody = Box<dyn Fn(&mut TestCase) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Tests to run, in this order. Empty means every registered test.
    pub tests: Vec<String>,
    pub test_filter: Option<String>,
    pub color: ColorChoice,
}

#[derive(Debug, Clone)]
pub enum TestFilter {
    Exact(String),
    Regex(Regex),
}

impl TryFrom<&str> for TestFilter {
    type Error = RunnerError;

    fn try_from(pattern: &str) -> Result<Self, Self::Error> {
        if pattern.starts_with('/') && pattern.ends_with('/') && pattern.len() > 2 {
            let regex_pattern = &pattern[1..pattern.len() - 1];
            Regex::new(regex_pattern)
                .map(TestFilter::Regex)
                .map_err(|e| RunnerError::InvalidFilter(e.to_string()))
        } else {
            Ok(TestFilter::Exact(pattern.to_string()))
        }
    }
}

impl TestFilter {
    pub fn matches(&self, test_name: &str) -> bool {
        match self {
            TestFilter::Exact(pattern) => test_name == pattern,
            TestFilter::Regex(regex) => regex.is_match(test_name),
        }
    }
}

pub struct TestDefinition {
    name: String,
    body: TestBody,
}

impl std::fmt::Debug for TestDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TestDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered registration table. Registration order is run order.
#[derive(Default)]
pub struct Suite {
    tests: Vec<TestDefinition>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        body: F,
    ) -> Result<&mut Self, RunnerError>
    where
        F: Fn(&mut TestCase) -> anyhow::Result<()> + 'static,
    {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RunnerError::DuplicateTest(name));
        }
        tracing::trace!(test = %name, "registered test");
        self.tests.push(TestDefinition {
            name,
            body: Box::new(body),
        });
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

fn execute(plan: &[&TestDefinition], reporter: &mut dyn Reporter) -> RunSummary {
    let mut summary = RunSummary::new();

    for definition in plan {
        let mut test = TestCase::new(definition.name());
        summary.test_started();
        test.run(&*definition.body, reporter);
        summary.test_finished(test.name(), test.outcome());
    }

    tracing::debug!(
        run = summary.run_count(),
        failed = summary.failure_count(),
        "test run complete"
    );
    summary.print_summary(reporter);
    summary
}

fn select<'a, S: AsRef<str>>(
    suite: &'a Suite,
    names: &[S],
) -> Result<Vec<&'a TestDefinition>, RunnerError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            suite
                .get(name)
                .ok_or_else(|| RunnerError::UnknownTest(name.to_string()))
        })
        .collect()
}

/// Runs every registered test that passes `filter`, then prints the summary.
pub fn run_suite(
    suite: &Suite,
    filter: Option<&TestFilter>,
    reporter: &mut dyn Reporter,
) -> RunSummary {
    let plan: Vec<_> = suite
        .tests
        .iter()
        .filter(|t| filter.map(|f| f.matches(&t.name)).unwrap_or(true))
        .collect();
    execute(&plan, reporter)
}

/// Runs the named tests in the given order. Unknown names are rejected
/// before any test runs.
pub fn run_selected<S: AsRef<str>>(
    suite: &Suite,
    names: &[S],
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, RunnerError> {
    let plan = select(suite, names)?;
    Ok(execute(&plan, reporter))
}

/// Runs with panic output routed to the log instead of stderr. The previous
/// hook is restored afterwards.
fn with_quiet_panics<T>(f: impl FnOnce() -> T) -> T {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!("test body panicked: {}", info);
    }));
    let result = f();
    panic::set_hook(previous);
    result
}

/// Resolves `options` into the ordered tests to run. The explicit list fixes
/// the order; the filter then drops names from it.
pub fn plan<'a>(
    suite: &'a Suite,
    options: &RunnerOptions,
) -> Result<Vec<&'a TestDefinition>, RunnerError> {
    let test_filter = options
        .test_filter
        .as_deref()
        .map(TestFilter::try_from)
        .transpose()?;

    let mut plan: Vec<&TestDefinition> = if options.tests.is_empty() {
        suite.tests.iter().collect()
    } else {
        select(suite, &options.tests)?
    };
    if let Some(ref filter) = test_filter {
        plan.retain(|t| filter.matches(&t.name));
    }

    Ok(plan)
}

/// Stdout entry point: selects, runs and reports according to `options`.
pub fn run_tests(suite: &Suite, options: &RunnerOptions) -> anyhow::Result<RunSummary> {
    let plan = plan(suite, options)?;
    if plan.is_empty() {
        tracing::warn!("No tests selected to run");
    }

    let mut reporter = TextReporter::stdout(options.color.enabled_for_stdout());
    let summary = with_quiet_panics(|| execute(&plan, &mut reporter));
    reporter.into_inner().map_err(RunnerError::from)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::test_case::Outcome;
    use crate::{is_eq, throws};
    use assert_matches::assert_matches;

    fn explode() -> anyhow::Result<()> {
        anyhow::bail!("raised")
    }

    fn scenario_suite() -> Suite {
        let mut suite = Suite::new();
        suite
            .register("A", |_| Ok(()))
            .unwrap()
            .register("B", |t| {
                is_eq!(t, 1, 2);
                Ok(())
            })
            .unwrap()
            .register("C", |_| Err(anyhow::anyhow!("boom")))
            .unwrap()
            .register("D", |t| {
                throws!(t, explode());
                Ok(())
            })
            .unwrap();
        suite
    }

    fn output(reporter: TextReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_filter_exact() {
        let filter = TestFilter::try_from("Pass").unwrap();
        assert!(filter.matches("Pass"));
        assert!(!filter.matches("PassException"));
    }

    #[test]
    fn test_filter_regex() {
        let filter = TestFilter::try_from("/^Pass/").unwrap();
        assert!(filter.matches("Pass"));
        assert!(filter.matches("PassException"));
        assert!(!filter.matches("FailException"));
    }

    #[test]
    fn test_filter_invalid_regex() {
        let result = TestFilter::try_from("/[unclosed/");
        assert_matches!(result, Err(RunnerError::InvalidFilter(_)));
    }

    #[test]
    fn test_filter_bare_slashes_are_exact() {
        assert_matches!(TestFilter::try_from("//"), Ok(TestFilter::Exact(_)));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut suite = Suite::new();
        suite.register("Same", |_| Ok(())).unwrap();
        let err = suite.register("Same", |_| Ok(())).err();
        assert_matches!(err, Some(RunnerError::DuplicateTest(name)) if name == "Same");
        assert_eq!(suite.len(), 1);
    }

    #[test]
    fn test_names_keep_registration_order() {
        let suite = scenario_suite();
        assert_eq!(suite.names().collect::<Vec<_>>(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_single_passing_test() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["A"], &mut reporter).unwrap();
        assert_eq!(summary.run_count(), 1);
        assert_eq!(summary.failure_count(), 0);
        assert_eq!(
            output(reporter),
            "\nRun      A\nFinished A\nStatus   Success\n\n\nSummary\n  Run:  1\n  Fail: 0\n"
        );
    }

    #[test]
    fn test_mismatch_scenario() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["B"], &mut reporter).unwrap();
        assert_eq!(summary.failed_tests(), ["B"]);

        let text = output(reporter);
        assert!(text.contains("Status   Failure\n"));
        assert!(text.contains("  Expected: 1\n  Actual: 2\n\n"));
    }

    #[test]
    fn test_error_scenario() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["C"], &mut reporter).unwrap();
        assert_eq!(summary.failed_tests(), ["C"]);
        assert!(output(reporter).contains("  Unexpected exception: boom\n\n"));
    }

    #[test]
    fn test_satisfied_throw_scenario() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["D"], &mut reporter).unwrap();
        assert!(!summary.has_failures());
        assert!(output(reporter).contains("Finished D\nStatus   Success\n"));
    }

    #[test]
    fn test_selected_order_is_preserved() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["C", "A", "B"], &mut reporter).unwrap();
        assert_eq!(summary.run_count(), 3);
        assert_eq!(summary.failed_tests(), ["C", "B"]);
        assert!(output(reporter).ends_with("  Run:  3\n  Fail: 2\n    C\n    B\n"));
    }

    #[test]
    fn test_run_suite_in_registration_order() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_suite(&suite, None, &mut reporter);
        assert_eq!(summary.run_count(), 4);
        assert_eq!(summary.failed_tests(), ["B", "C"]);

        let text = output(reporter);
        let starts: Vec<_> = text
            .lines()
            .filter_map(|l| l.strip_prefix("Run      "))
            .collect();
        assert_eq!(starts, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_run_suite_with_filter() {
        let suite = scenario_suite();
        let filter = TestFilter::try_from("/^[AD]$/").unwrap();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_suite(&suite, Some(&filter), &mut reporter);
        assert_eq!(summary.run_count(), 2);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_unknown_test_runs_nothing() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let result = run_selected(&suite, &["A", "Missing"], &mut reporter);
        assert_matches!(result, Err(RunnerError::UnknownTest(name)) if name == "Missing");
        assert!(output(reporter).is_empty());
    }

    #[test]
    fn test_each_run_gets_a_fresh_case() {
        let suite = scenario_suite();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_selected(&suite, &["B", "B", "A"], &mut reporter).unwrap();
        assert_eq!(summary.failed_tests(), ["B", "B"]);

        let text = output(reporter);
        assert_eq!(text.matches("Line: ").count(), 2);
    }

    #[test]
    fn test_panicking_body_does_not_stop_run() {
        let mut suite = Suite::new();
        suite
            .register("Panics", |_| panic!("mid-body"))
            .unwrap()
            .register("After", |_| Ok(()))
            .unwrap();
        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = run_suite(&suite, None, &mut reporter);
        assert_eq!(summary.run_count(), 2);
        assert_eq!(summary.failed_tests(), ["Panics"]);
        assert!(output(reporter).contains("Finished After\nStatus   Success\n"));
    }

    fn options(tests: &[&str], test_filter: Option<&str>) -> RunnerOptions {
        RunnerOptions {
            tests: tests.iter().map(|s| s.to_string()).collect(),
            test_filter: test_filter.map(str::to_string),
            color: ColorChoice::Never,
        }
    }

    fn planned_names(suite: &Suite, options: &RunnerOptions) -> Vec<String> {
        plan(suite, options)
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    #[test]
    fn test_plan_defaults_to_registration_order() {
        let suite = scenario_suite();
        assert_eq!(planned_names(&suite, &options(&[], None)), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_plan_filters_explicit_list_in_list_order() {
        let suite = scenario_suite();
        let opts = options(&["D", "B", "A", "C"], Some("/^[ACD]$/"));
        assert_eq!(planned_names(&suite, &opts), ["D", "A", "C"]);
    }

    #[test]
    fn test_plan_filters_whole_suite() {
        let suite = scenario_suite();
        assert_eq!(planned_names(&suite, &options(&[], Some("C"))), ["C"]);
    }

    #[test]
    fn test_plan_rejects_invalid_filter() {
        let suite = scenario_suite();
        let result = plan(&suite, &options(&["A"], Some("/(/")));
        assert_matches!(result, Err(RunnerError::InvalidFilter(_)));
    }

    #[test]
    fn test_plan_rejects_unknown_name() {
        let suite = scenario_suite();
        let result = plan(&suite, &options(&["A", "Z"], None));
        assert_matches!(result, Err(RunnerError::UnknownTest(name)) if name == "Z");
    }

    #[test]
    fn test_invalid_filter_fails_run_tests() {
        let suite = scenario_suite();
        let err = run_tests(&suite, &options(&[], Some("/[/"))).unwrap_err();
        assert_matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::InvalidFilter(_))
        );
    }

    #[test]
    fn test_empty_plan_still_prints_summary() {
        let suite = scenario_suite();
        let opts = options(&[], Some("NoSuchTest"));
        let selected = plan(&suite, &opts).unwrap();
        assert!(selected.is_empty());

        let mut reporter = TextReporter::new(Vec::new(), false);
        let summary = execute(&selected, &mut reporter);
        assert_eq!(summary.run_count(), 0);
        assert_eq!(output(reporter), "\n\nSummary\n  Run:  0\n  Fail: 0\n");
    }

    #[test]
    fn test_quiet_panics_restores_previous_hook() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        const MARKER: &str = "restored-hook-marker";
        let seen = Arc::new(AtomicBool::new(false));
        let hook_seen = Arc::clone(&seen);
        let original = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if crate::runner::test_case::panic_message(info.payload()).as_deref() == Some(MARKER) {
                hook_seen.store(true, Ordering::SeqCst);
            }
        }));

        let inside = with_quiet_panics(|| {
            let _ = panic::catch_unwind(|| panic!("{}", MARKER));
            seen.load(Ordering::SeqCst)
        });
        let _ = panic::catch_unwind(|| panic!("{}", MARKER));
        let after = seen.load(Ordering::SeqCst);

        panic::set_hook(original);
        assert!(!inside, "custom hook must be replaced during the run");
        assert!(after, "custom hook must be back after the run");
    }

    #[test]
    fn test_outcome_is_final_after_run() {
        let mut test = TestCase::new("Final");
        let mut reporter = TextReporter::new(Vec::new(), false);
        test.run(
            |t| {
                is_eq!(t, "a", "b");
                Ok(())
            },
            &mut reporter,
        );
        assert_eq!(test.outcome(), Outcome::Failure);
    }
}
