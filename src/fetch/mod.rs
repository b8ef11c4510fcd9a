// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into the raw bytes of a document.
//
// Everything goes through the `Fetch` trait, so the transport can be swapped:
// - http: the default, a reqwest GET
// - retry: wraps another fetcher and retries transient failures
// - FnFetcher: adapts a plain closure (handy for tests)
//
// A Resolver holds exactly one fetcher; see `Resolver::set_fetcher`.
// =============================================================================

mod http;
mod retry;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchError;

pub use http::HttpFetcher;
pub use retry::RetryFetcher;

/// Retrieves the bytes behind a URL.
///
/// Implementations report transport failures and non-success responses as
/// a FetchError. Timeouts are the implementation's business.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[async_trait]
impl<T: Fetch + ?Sized> Fetch for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url).await
    }
}

/// A fetcher backed by a synchronous closure.
pub struct FnFetcher<F>(F);

#[async_trait]
impl<F> Fetch for FnFetcher<F>
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (self.0)(url)
    }
}

/// Wraps a closure as a fetcher.
///
/// ```
/// use sitemap_resolver::fetch::from_fn;
///
/// let echo = from_fn(|url: &str| Ok(url.as_bytes().to_vec()));
/// # let _ = echo;
/// ```
pub fn from_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    FnFetcher(f)
}
