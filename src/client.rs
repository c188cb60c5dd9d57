//! HTTP client for the timemap endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::WaybackConfig;
use crate::timemap::TimemapQuery;

/// Errors while setting up the client. These are configuration mistakes.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid timemap endpoint {url:?}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Errors from a single timemap request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Timemap API returned {0}")]
    Status(StatusCode),
}

/// Timemap API client.
pub struct TimemapClient {
    client: Client,
    endpoint: Url,
}

impl TimemapClient {
    /// Create a client from configuration.
    pub fn new(config: &WaybackConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.timemap_url).map_err(|source| ClientError::Endpoint {
            url: config.timemap_url.clone(),
            source,
        })?;

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue the query and return the response body.
    pub async fn fetch(&self, query: &TimemapQuery) -> Result<String, FetchError> {
        let url = query.request_url(&self.endpoint);
        debug!("Querying Wayback timemap API: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!("Timemap response: {} bytes", body.len());
        Ok(body)
    }
}
