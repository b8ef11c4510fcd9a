// src/fetch/retry.rs
// =============================================================================
// A fetcher decorator that retries transient failures.
//
// The resolver never retries on its own. Wrap the transport instead:
//   RetryFetcher::new(HttpFetcher::new(&config)?, 3)
//
// Backoff doubles after every failed attempt, up to `max_delay`.
// Only transient errors (transport, 429, 5xx) are retried.
// =============================================================================

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use super::Fetch;
use crate::error::FetchError;

pub struct RetryFetcher<F> {
    inner: F,
    attempts: usize,
    initial_delay: Duration,
    max_delay: Duration,
}

impl<F: Fetch> RetryFetcher<F> {
    /// `attempts` counts the first try; values below 1 are treated as 1.
    pub fn new(inner: F, attempts: usize) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }

    pub fn with_backoff(mut self, initial_delay: Duration, max_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self.max_delay = max_delay;
        self
    }
}

#[async_trait]
impl<F: Fetch> Fetch for RetryFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut attempt = 1;
        let mut delay = self.initial_delay;

        loop {
            match self.inner.fetch(url).await {
                Err(err) if err.is_transient() && attempt < self.attempts => {
                    warn!(url, attempt, error = %err, "fetch failed, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.max_delay);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
