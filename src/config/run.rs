use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::args::WorkgenArgs;
use crate::command::TransactionPolicy;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::transport::Protocol;

/// Where the workload lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    File(PathBuf),
    Inline(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Await each send before moving on.
    Sequential,
    /// Spawn each send on its own task.
    Detached,
}

/// Immutable settings for one run, built once at startup and handed to the
/// dispatcher and transports.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub host: String,
    pub port: u16,
    pub source: CommandSource,
    pub rate: Duration,
    pub protocol: Protocol,
    pub parallel: bool,
    pub transactions: TransactionPolicy,
    pub countdown_secs: u64,
    pub delivery: DeliveryMode,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl RunConfig {
    /// Builds the run configuration from merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the target is unusable or no command source
    /// was given.
    pub fn from_args(args: &WorkgenArgs) -> AppResult<Self> {
        let host = args.host.trim();
        if host.is_empty() {
            return Err(AppError::validation(ValidationError::EmptyHost));
        }
        if args.port == 0 {
            return Err(AppError::validation(ValidationError::PortZero));
        }

        let source = match (args.file.as_deref(), args.command.as_deref()) {
            (Some(path), _) => CommandSource::File(PathBuf::from(path)),
            (None, Some(command)) => CommandSource::Inline(command.to_owned()),
            (None, None) => return Err(AppError::config(ConfigError::NoCommandSource)),
        };

        let parallel = match source {
            CommandSource::File(_) => args.parallel,
            CommandSource::Inline(_) => {
                if args.parallel {
                    tracing::warn!("--para is ignored for a single inline command.");
                }
                false
            }
        };

        Ok(Self {
            host: host.to_owned(),
            port: args.port,
            source,
            rate: Duration::from_millis(args.rate_ms),
            protocol: if args.tcp {
                Protocol::Tcp
            } else {
                Protocol::Http
            },
            parallel,
            transactions: if args.use_transaction_number {
                TransactionPolicy::FromScript
            } else {
                TransactionPolicy::Placeholder
            },
            countdown_secs: args.countdown_secs,
            delivery: if args.detach {
                DeliveryMode::Detached
            } else {
                DeliveryMode::Sequential
            },
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
        })
    }

    /// `host:port` of the target.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The HTTP result endpoint, `http://host:port/result`.
    ///
    /// # Errors
    ///
    /// Returns an error when host and port do not form a valid URL.
    pub fn result_url(&self) -> AppResult<Url> {
        let target = format!("http://{}/result", self.addr());
        Url::parse(&target)
            .map_err(|source| AppError::config(ConfigError::InvalidTarget { target, source }))
    }
}
