use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::CONNECTION};
use url::Url;

use crate::command::Command;
use crate::config::RunConfig;
use crate::error::{AppError, AppResult, TransportError};

use super::form::encode_form;
use super::{Protocol, Transport};

pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// Creates a client that never keeps idle connections around.
    ///
    /// # Errors
    ///
    /// Returns an error when the result URL is invalid or the client cannot
    /// be built.
    pub fn new(config: &RunConfig) -> AppResult<Self> {
        let url = config.result_url()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)))
            .no_proxy()
            .build()
            .map_err(|source| AppError::transport(TransportError::BuildClient { source }))?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    async fn send(&self, command: &Command) -> Result<(), TransportError> {
        let form = encode_form(command);
        let response = self
            .client
            .post(self.url.clone())
            .header(CONNECTION, "close")
            .form(&form)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        // body is never read
        drop(response);

        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
