use simpleut::{is_eq, is_false, is_not_eq, is_true, throws, RunnerError, Suite};

/// Order the sample run uses when no names are given on the command line.
pub const DEFAULT_ORDER: &[&str] = &[
    "DummyPass",
    "FailException",
    "PassException",
    "FailExceptionInTest",
    "Fail",
    "Pass",
];

fn does_nothing() {}

fn always_errors() -> anyhow::Result<()> {
    anyhow::bail!("expected error")
}

pub fn build_suite() -> Result<Suite, RunnerError> {
    let mut suite = Suite::new();

    suite
        .register("DummyPass", |_| {
            println!("Dummy");
            Ok(())
        })?
        .register("Fail", |t| {
            is_eq!(t, 1, 2);
            is_not_eq!(t, 1, 1);
            is_true!(t, 1 == 2);
            let (a, b) = (1, 2);
            is_false!(t, a != b);
            Ok(())
        })?
        .register("Pass", |t| {
            is_eq!(t, 1, 1);
            is_not_eq!(t, 1, 2);
            let (a, b) = (1, 2);
            is_true!(t, a + 1 == b);
            is_false!(t, a == b);
            Ok(())
        })?
        .register("FailExceptionInTest", |_| {
            println!("DummyFException");
            anyhow::bail!("Dummy")
        })?
        .register("PassException", |t| {
            println!("pass1");
            throws!(t, always_errors());
            println!("pass2");
            Ok(())
        })?
        .register("FailException", |t| {
            println!("fail1");
            throws!(t, does_nothing());
            println!("fail2");
            Ok(())
        })?;

    Ok(suite)
}
