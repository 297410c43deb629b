use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::error;

use crate::config::CommandSource;
use crate::error::{AppError, AppResult, ConfigError};

pub enum ScriptReader {
    File {
        path: PathBuf,
        lines: Lines<BufReader<File>>,
    },
    Inline(VecDeque<String>),
}

impl ScriptReader {
    /// Opens the configured command source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OpenScript`] when the workload file cannot be
    /// opened. This is fatal and happens before any dispatch.
    pub async fn open(source: &CommandSource) -> AppResult<Self> {
        match source {
            CommandSource::File(path) => Self::open_file(path).await,
            CommandSource::Inline(text) => Ok(Self::inline(text)),
        }
    }

    async fn open_file(path: &Path) -> AppResult<Self> {
        let file = File::open(path).await.map_err(|source| {
            AppError::config(ConfigError::OpenScript {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Ok(Self::File {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }

    /// Splits inline text into lines the same way a file would be read.
    #[must_use]
    pub fn inline(text: &str) -> Self {
        Self::Inline(text.lines().map(str::to_owned).collect())
    }

    /// Returns the next line, or `None` at the end of the script.
    ///
    /// A read failure part-way through a file is logged and ends the script;
    /// whatever was read so far is still replayed.
    pub async fn next_line(&mut self) -> Option<String> {
        match self {
            Self::Inline(lines) => lines.pop_front(),
            Self::File { path, lines } => match lines.next_line().await {
                Ok(line) => line,
                Err(source) => {
                    let err = ConfigError::ReadScript {
                        path: path.clone(),
                        source,
                    };
                    error!("{}", err);
                    None
                }
            },
        }
    }
}
