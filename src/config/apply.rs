use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::WorkgenArgs;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn duration_field(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|source| AppError::config(ConfigError::InvalidField { field, source }))
}

/// Applies config-file values to every argument not set on the command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut WorkgenArgs,
    matches: &ArgMatches,
    config: ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "host")
        && let Some(host) = config.host
    {
        args.host = host;
    }

    if !is_cli(matches, "port")
        && let Some(port) = config.port
    {
        args.port = port;
    }

    if !is_cli(matches, "file")
        && !is_cli(matches, "command")
        && let Some(file) = config.file
    {
        args.file = Some(file);
    }

    if !is_cli(matches, "command")
        && !is_cli(matches, "file")
        && let Some(command) = config.command
    {
        args.command = Some(command);
    }

    if !is_cli(matches, "rate_ms")
        && let Some(rate) = config.rate
    {
        args.rate_ms = rate;
    }

    if !is_cli(matches, "tcp")
        && let Some(tcp) = config.tcp
    {
        args.tcp = tcp;
    }

    if !is_cli(matches, "parallel")
        && let Some(parallel) = config.parallel
    {
        args.parallel = parallel;
    }

    if !is_cli(matches, "use_transaction_number")
        && let Some(value) = config.use_transaction_number
    {
        args.use_transaction_number = value;
    }

    if !is_cli(matches, "countdown_secs")
        && let Some(countdown) = config.countdown
    {
        args.countdown_secs = countdown;
    }

    if !is_cli(matches, "detach")
        && let Some(detach) = config.detach
    {
        args.detach = detach;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = duration_field(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = duration_field(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}
