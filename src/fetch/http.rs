// src/fetch/http.rs
// =============================================================================
// The default fetcher: a plain HTTP GET with reqwest.
//
// - The URL is validated with the `url` crate before any network I/O
// - 2xx responses return the body bytes
// - Any other status becomes FetchError::Status
// - Connection problems, timeouts and redirect loops become
//   FetchError::Transport
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::Fetch;
use crate::config::ResolverConfig;
use crate::error::FetchError;

/// Fetches documents over HTTP(S) with a shared reqwest client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client using the timeout and user agent from `config`.
    pub fn new(config: &ResolverConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Uses an already configured client as-is.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!(url, "GET");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!(url, bytes = body.len(), status = status.as_u16(), "fetched");
        Ok(body.to_vec())
    }
}
