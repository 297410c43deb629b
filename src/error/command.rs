use thiserror::Error;

/// Per-line failures. A line that produces one of these is logged and
/// skipped; the run continues with the next line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command '{token}' in line '{line}'.")]
    InvalidCommand { token: String, line: String },
    #[error("Malformed line '{line}': missing [transaction] prefix.")]
    MissingTransaction { line: String },
    #[error("Malformed line '{line}': {command} expects {expected} field(s), got {actual}.")]
    FieldCount {
        command: &'static str,
        expected: usize,
        actual: usize,
        line: String,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl CommandError {
    /// Returns true for the malformed-line family (as opposed to an unknown
    /// command token).
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            CommandError::MissingTransaction { .. } | CommandError::FieldCount { .. }
        )
    }

    /// Label used when a skipped line is reported.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        if self.is_malformed() {
            "MalformedLine"
        } else {
            "InvalidCommand"
        }
    }
}
