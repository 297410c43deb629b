use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP request to {url} returned status {status}.")]
    UnexpectedStatus { url: String, status: u16 },
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Timed out connecting to {addr}.")]
    ConnectTimeout { addr: String },
    #[error("Failed to write to {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Timed out writing to {addr}.")]
    WriteTimeout { addr: String },
}
