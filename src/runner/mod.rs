pub mod errors;
pub mod executor;
pub mod reporter;
pub mod summary;
pub mod test_case;

pub use errors::RunnerError;
pub use executor::{plan, run_selected, run_suite, run_tests, RunnerOptions, Suite, TestFilter};
pub use reporter::{ColorChoice, Reporter, TextReporter};
pub use summary::RunSummary;
pub use test_case::{Outcome, TestCase};
