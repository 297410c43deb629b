mod app;
mod command;
mod config;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use command::CommandError;
pub use config::ConfigError;
pub use transport::TransportError;
pub use validation::ValidationError;
