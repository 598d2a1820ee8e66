use clap::Parser;
use simpleut::logging::init_logging;
use simpleut::{run_tests, ColorChoice, RunnerOptions};
use std::path::PathBuf;

mod demo;

#[derive(Parser)]
#[command(name = "simpleut")]
#[command(about = "Run the sample unit tests sequentially and print a summary")]
#[command(version)]
struct Cli {
    /// Tests to run, in order (default: the standard sample order)
    #[arg(value_name = "TESTS")]
    tests: Vec<String>,

    /// Filter tests by name (exact match or /regex/)
    #[arg(long = "test")]
    test_filter: Option<String>,

    /// When to color the status labels
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// List registered tests and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let suite = demo::build_suite()?;

    if cli.list {
        for name in suite.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let tests = if cli.tests.is_empty() {
        demo::DEFAULT_ORDER.iter().map(|s| s.to_string()).collect()
    } else {
        cli.tests
    };

    let options = RunnerOptions {
        tests,
        test_filter: cli.test_filter,
        color: cli.color,
    };

    let summary = run_tests(&suite, &options)?;
    drop(log_guard);
    std::process::exit(if summary.has_failures() { 1 } else { 0 });
}
