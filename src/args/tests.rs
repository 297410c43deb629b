use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration};
use super::test_support::parse_test_args;
use crate::error::{AppError, AppResult, ValidationError};

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["workgen", "-f", "workload.txt"])?;

    let checks = [
        (args.host == "localhost", "Unexpected host"),
        (args.port == 44440, "Unexpected port"),
        (
            args.file.as_deref() == Some("workload.txt"),
            "Unexpected file",
        ),
        (args.command.is_none(), "Expected command to be None"),
        (args.rate_ms == 50, "Unexpected rate"),
        (!args.tcp, "Expected tcp to be false"),
        (!args.parallel, "Expected parallel to be false"),
        (
            args.use_transaction_number,
            "Expected use_transaction_number to default to true",
        ),
        (args.countdown_secs == 3, "Unexpected countdown"),
        (!args.detach, "Expected detach to be false"),
        (
            args.request_timeout == Duration::from_secs(10),
            "Unexpected request_timeout",
        ),
        (
            args.connect_timeout == Duration::from_secs(5),
            "Unexpected connect_timeout",
        ),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_and_legacy_flag_names() -> AppResult<()> {
    let args = parse_test_args([
        "workgen",
        "--ip",
        "10.0.0.5",
        "-p",
        "8080",
        "-c",
        "[1] ADD,u1,100",
        "-r",
        "0",
        "--tcp",
        "--para",
        "--num",
        "false",
        "--countdown",
        "0",
        "--detach",
        "--timeout",
        "250ms",
    ])?;

    if args.host != "10.0.0.5" || args.port != 8080 {
        return Err(AppError::validation("Unexpected target"));
    }
    if args.command.as_deref() != Some("[1] ADD,u1,100") {
        return Err(AppError::validation("Unexpected command"));
    }
    if args.rate_ms != 0 || !args.tcp || !args.parallel || !args.detach {
        return Err(AppError::validation("Unexpected flags"));
    }
    if args.use_transaction_number {
        return Err(AppError::validation("Expected --num false to disable"));
    }
    if args.countdown_secs != 0 {
        return Err(AppError::validation("Unexpected countdown"));
    }
    if args.request_timeout != Duration::from_millis(250) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_bad_duration() -> AppResult<()> {
    match parse_test_args(["workgen", "--timeout", "10parsecs"]) {
        Err(AppError::Clap { .. }) => Ok(()),
        Err(other) => Err(AppError::validation(format!(
            "Unexpected error: {}",
            other
        ))),
        Ok(_) => Err(AppError::validation("Expected parse failure")),
    }
}

#[test]
fn parse_bool_env_accepts_common_spellings() -> AppResult<()> {
    for value in ["1", "true", "YES", "y", "on"] {
        if !parse_bool_env(value)? {
            return Err(AppError::validation(format!("Expected true for {}", value)));
        }
    }
    for value in ["0", "false", "No", "n", "off"] {
        if parse_bool_env(value)? {
            return Err(AppError::validation(format!("Expected false for {}", value)));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("Expected invalid boolean"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("200ms", Duration::from_millis(200)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "{} parsed as {:?}",
                input, parsed
            )));
        }
    }
    if !matches!(parse_duration("0s"), Err(ValidationError::DurationZero)) {
        return Err(AppError::validation("Expected DurationZero"));
    }
    if !matches!(parse_duration(""), Err(ValidationError::DurationEmpty)) {
        return Err(AppError::validation("Expected DurationEmpty"));
    }
    if !matches!(
        parse_duration("5d"),
        Err(ValidationError::InvalidDurationUnit { .. })
    ) {
        return Err(AppError::validation("Expected InvalidDurationUnit"));
    }
    Ok(())
}
