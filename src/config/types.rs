use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration;
use crate::error::ValidationError;

/// On-disk configuration. Every key mirrors a CLI flag and only applies when
/// that flag was not given on the command line.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "ip")]
    pub host: Option<String>,
    pub port: Option<u16>,
    pub file: Option<String>,
    pub command: Option<String>,
    /// Delay between commands in milliseconds.
    pub rate: Option<u64>,
    pub tcp: Option<bool>,
    #[serde(alias = "para")]
    pub parallel: Option<bool>,
    #[serde(alias = "num")]
    pub use_transaction_number: Option<bool>,
    pub countdown: Option<u64>,
    pub detach: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
