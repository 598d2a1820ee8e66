pub mod assertions;
pub mod logging;
pub mod report;
pub mod runner;

pub use report::{Failure, Indent, MismatchFailure, SameFailure};
pub use runner::{
    run_selected, run_suite, run_tests, ColorChoice, Outcome, Reporter, RunSummary, RunnerError,
    RunnerOptions, Suite, TestCase, TestFilter, TextReporter,
};
