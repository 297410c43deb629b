use clap::{ArgAction, Parser};
use std::time::Duration;

use super::defaults::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_COUNTDOWN_SECS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_MS,
    DEFAULT_REQUEST_TIMEOUT,
};
use super::parsers::{parse_bool_env, parse_duration_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Replays a workload script of bracketed, transactional commands against a target service over HTTP or raw TCP."
)]
pub struct WorkgenArgs {
    /// IP address or hostname of the target service
    #[arg(long = "ip", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port of the target service
    #[arg(long = "port", short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Workload file to execute commands from
    #[arg(long = "file", short = 'f')]
    pub file: Option<String>,

    /// Single command line to execute, e.g. "[1] ADD,alice,100.00"
    #[arg(long = "command", short = 'c')]
    pub command: Option<String>,

    /// Delay (in ms) between successive commands
    #[arg(long = "rate", short = 'r', default_value_t = DEFAULT_RATE_MS)]
    pub rate_ms: u64,

    /// Send each command as a raw TCP line instead of an HTTP form post
    #[arg(long = "tcp")]
    pub tcp: bool,

    /// Replay the workload per user, releasing every user at once
    #[arg(long = "para", alias = "parallel")]
    pub parallel: bool,

    /// Forward the transaction number from the workload file (false sends 0)
    #[arg(
        long = "num",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_bool_env
    )]
    pub use_transaction_number: bool,

    /// Seconds to count down before parallel users are released
    #[arg(long = "countdown", default_value_t = DEFAULT_COUNTDOWN_SECS)]
    pub countdown_secs: u64,

    /// Send each command on its own task instead of awaiting it
    #[arg(long = "detach")]
    pub detach: bool,

    /// Request/write timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = DEFAULT_CONNECT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Path to a TOML or JSON config file (defaults to workgen.toml/workgen.json)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by WORKGEN_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
