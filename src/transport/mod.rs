//! Wire encoders for replayed commands: HTTP form posts and raw TCP lines.
//!
//! The protocol is a run-wide switch. Every send uses a fresh connection so the
//! load pattern on the target is not shaped by connection reuse.
mod form;
mod http;
mod tcp;


use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::command::Command;
use crate::config::RunConfig;
use crate::error::{AppResult, TransportError};

pub use form::{FormField, encode_form};
pub use http::HttpTransport;
pub use tcp::{TcpTransport, tcp_payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Tcp,
}

impl Protocol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "HTTP",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// Sends one command to the target.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the connection, write, or HTTP
    /// exchange fails. Callers log and drop it.
    async fn send(&self, command: &Command) -> Result<(), TransportError>;
}

/// Builds the transport selected by the run configuration.
///
/// # Errors
///
/// Returns an error when the target URL is invalid or the HTTP client cannot
/// be built.
pub fn build_transport(config: &RunConfig) -> AppResult<Arc<dyn Transport>> {
    match config.protocol {
        Protocol::Http => Ok(Arc::new(HttpTransport::new(config)?)),
        Protocol::Tcp => Ok(Arc::new(TcpTransport::new(config))),
    }
}
