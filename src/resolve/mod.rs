// src/resolve/mod.rs
// =============================================================================
// This module turns a sitemap URL into one flat list of page URLs.
//
// Features:
// - Fetches the root document and decides by its root element whether it is
//   a <urlset> or a <sitemapindex>
// - Follows index entries recursively, one child at a time
// - Polite fetching: pauses between child fetches of an index
// - Fails fast: any error anywhere aborts the whole resolution
// =============================================================================

mod resolver;

pub use resolver::Resolver;
