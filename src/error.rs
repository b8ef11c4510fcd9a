// src/error.rs
// =============================================================================
// Error types for the whole library.
//
// Every failure ends up as one `Error`, whatever recursion depth it happened
// at. The variants say which stage failed:
// - Fetch: the document could not be downloaded
// - Decode: the bytes are not a sitemap/index document we understand
// - EmptySitemap: the document decoded fine but lists no URLs
// - TooDeep: sitemap indexes nest deeper than the configured limit
// - Client: the default HTTP client could not be created
// =============================================================================

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by fetch, parse and resolve operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A flat sitemap (or a fully resolved index) with zero URL entries.
    #[error("sitemap at {0} contains no URL entries")]
    EmptySitemap(String),

    #[error("sitemap index nesting exceeds {max_depth} levels at {url}")]
    TooDeep { url: String, max_depth: usize },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Short name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Fetch(_) => "fetch",
            Error::Decode(_) => "decode",
            Error::EmptySitemap(_) => "validate",
            Error::TooDeep { .. } => "resolve",
            Error::Client(_) => "setup",
        }
    }
}

/// Failure retrieving the bytes of a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Catch-all for custom fetchers that are not backed by reqwest.
    #[error("failed to fetch {url}: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was for.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Other { url, .. } => url,
        }
    }

    /// Whether trying the same request again could succeed.
    ///
    /// Transport problems, 429 and 5xx are transient, everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::InvalidUrl { .. } | FetchError::Other { .. } => false,
        }
    }
}

/// Failure turning bytes into a sitemap or sitemap index.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: unexpected end of document inside <{0}>")]
    Truncated(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("unrecognized root element <{0}>, expected <urlset> or <sitemapindex>")]
    UnknownRoot(String),

    #[error("document does not match the expected structure: {0}")]
    Structure(#[from] quick_xml::de::DeError),

    #[error("entry {index} has no <loc>")]
    MissingLocation { index: usize },

    #[error("entry {index} has a non-numeric <priority> '{value}'")]
    InvalidPriority { index: usize, value: String },
}
