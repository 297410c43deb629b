use super::{CommandError, ConfigError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for CommandError {
    fn from(message: &'static str) -> Self {
        CommandError::TestExpectation { message }
    }
}

impl From<String> for CommandError {
    fn from(value: String) -> Self {
        CommandError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
