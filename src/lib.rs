// src/lib.rs
// =============================================================================
// sitemap_resolver: fetch XML sitemaps and flatten sitemap indexes.
//
// Modules:
// - sitemap: data types and the XML parser (pure, no I/O)
// - fetch: the Fetch trait and its HTTP / retry / closure implementations
// - resolve: the Resolver that fetches, parses, and flattens indexes
// - config: settings for a Resolver (interval, timeout, depth limit)
// - error: the error types every operation returns
//
// Quick start:
//   let sitemap = sitemap_resolver::get("https://example.com/sitemap.xml").await?;
//   for url in sitemap.locations() { println!("{}", url); }
// =============================================================================

pub mod config;
pub mod error;
pub mod fetch;
pub mod resolve;
pub mod sitemap;

pub use config::ResolverConfig;
pub use error::{DecodeError, Error, FetchError, Result};
pub use fetch::Fetch;
pub use resolve::Resolver;
pub use sitemap::{Document, Sitemap, SitemapIndex, SitemapIndexEntry, UrlEntry};

/// Fetches `url` with a default HTTP resolver and flattens any index.
///
/// Use a [`Resolver`] directly to change the interval or the fetcher.
pub async fn get(url: &str) -> Result<Sitemap> {
    Resolver::new(ResolverConfig::default())?.get(url).await
}

/// Parses bytes as a flat `<urlset>` sitemap. No fetching, no recursion.
pub fn parse(bytes: &[u8]) -> Result<Sitemap> {
    Ok(sitemap::parse_sitemap(bytes)?)
}

/// Parses bytes as a `<sitemapindex>`. Children are not fetched.
pub fn parse_index(bytes: &[u8]) -> Result<SitemapIndex> {
    Ok(sitemap::parse_sitemap_index(bytes)?)
}
