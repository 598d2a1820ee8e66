use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Test \"{0}\" is already registered")]
    DuplicateTest(String),
    #[error("Unknown test: {0}")]
    UnknownTest(String),
    #[error("Invalid test filter: {0}")]
    InvalidFilter(String),
    #[error("Failed to write test report: {0}")]
    Output(#[from] std::io::Error),
}
