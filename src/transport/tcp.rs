use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::command::Command;
use crate::config::RunConfig;
use crate::error::TransportError;

use super::{Protocol, Transport};

/// Newline-terminated wire line: the command body plus the transaction id.
#[must_use]
pub fn tcp_payload(command: &Command) -> String {
    format!("{},{}\n", command.raw_text(), command.transaction())
}

pub struct TcpTransport {
    addr: String,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl TcpTransport {
    #[must_use]
    pub fn new(config: &RunConfig) -> Self {
        Self {
            addr: config.addr(),
            connect_timeout: config.connect_timeout,
            write_timeout: config.request_timeout,
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn send(&self, command: &Command) -> Result<(), TransportError> {
        let mut stream = match timeout(self.connect_timeout, TcpStream::connect(&self.addr)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(TransportError::Connect {
                    addr: self.addr.clone(),
                    source,
                });
            }
            Err(_) => {
                return Err(TransportError::ConnectTimeout {
                    addr: self.addr.clone(),
                });
            }
        };

        let payload = tcp_payload(command);
        let written = timeout(self.write_timeout, stream.write_all(payload.as_bytes())).await;
        // closed regardless of the write outcome
        if let Err(err) = stream.shutdown().await {
            debug!("TCP shutdown for {} failed: {}", self.addr, err);
        }

        match written {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(TransportError::Write {
                addr: self.addr.clone(),
                source,
            }),
            Err(_) => Err(TransportError::WriteTimeout {
                addr: self.addr.clone(),
            }),
        }
    }
}
