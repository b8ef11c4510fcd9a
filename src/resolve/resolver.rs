// src/resolve/resolver.rs
// =============================================================================
// The Resolver: fetch, parse, and flatten.
//
// How it works:
// 1. Fetch the URL through the configured fetcher
// 2. Look at the root element and parse as <urlset> or <sitemapindex>
// 3. <urlset>: return it, unless it has no entries (that is an error)
// 4. <sitemapindex>: resolve every child in document order, sleeping
//    `interval` before each child except the first, and append the child's
//    entries to the result
//
// Children are resolved sequentially. Running them in parallel would defeat
// the interval.
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::sitemap::{parse_document, Document, Sitemap};

/// Fetches sitemaps and flattens sitemap indexes.
///
/// Each resolver owns its fetcher and its settings. Two resolvers never
/// share configuration, so changing one does not affect the other.
pub struct Resolver {
    fetcher: Arc<dyn Fetch>,
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver that fetches over HTTP.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config).map_err(Error::Client)?;
        Ok(Self::with_fetcher(fetcher, config))
    }

    /// Creates a resolver around a custom fetcher.
    pub fn with_fetcher(fetcher: impl Fetch + 'static, config: ResolverConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The pause applied between child fetches of an index.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// Replaces the pause used by later `get` calls on this resolver.
    pub fn set_interval(&mut self, interval: Duration) {
        self.config.interval = interval;
    }

    /// Replaces the fetcher used by later calls on this resolver.
    pub fn set_fetcher(&mut self, fetcher: impl Fetch + 'static) {
        self.fetcher = Arc::new(fetcher);
    }

    /// Fetches raw bytes through the active fetcher, without parsing.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.fetcher.fetch(url).await?)
    }

    /// Fetches `url` and returns every page URL it leads to.
    ///
    /// The result is never empty: an empty sitemap is reported as
    /// `Error::EmptySitemap`.
    pub async fn get(&self, url: &str) -> Result<Sitemap> {
        let sitemap = self.resolve(url, 0).await?;
        info!(url, entries = sitemap.len(), "sitemap resolved");
        Ok(sitemap)
    }

    // Boxed because the future recurses into itself for index children
    fn resolve<'a>(&'a self, url: &'a str, depth: usize) -> BoxFuture<'a, Result<Sitemap>> {
        async move {
            let bytes = self.fetch(url).await?;

            match parse_document(&bytes)? {
                Document::Sitemap(sitemap) => {
                    if sitemap.is_empty() {
                        return Err(Error::EmptySitemap(url.to_string()));
                    }
                    debug!(url, entries = sitemap.len(), "parsed urlset");
                    Ok(sitemap)
                }
                Document::Index(index) => {
                    if depth >= self.config.max_depth {
                        return Err(Error::TooDeep {
                            url: url.to_string(),
                            max_depth: self.config.max_depth,
                        });
                    }
                    debug!(url, children = index.len(), depth, "parsed sitemapindex");

                    let mut entries = Vec::new();
                    for (i, child) in index.children.iter().enumerate() {
                        if i > 0 && !self.config.interval.is_zero() {
                            tokio::time::sleep(self.config.interval).await;
                        }
                        let sitemap = self.resolve(&child.location, depth + 1).await?;
                        entries.extend(sitemap.entries);
                    }

                    // Only reachable for an index with no children
                    if entries.is_empty() {
                        return Err(Error::EmptySitemap(url.to_string()));
                    }
                    Ok(Sitemap { entries })
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, FetchError};
    use crate::fetch::from_fn;
    use std::collections::HashMap;
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURES: [(&str, &str); 6] = [
        ("sitemap.xml", include_str!("../../testdata/sitemap.xml")),
        ("emptymap.xml", include_str!("../../testdata/emptymap.xml")),
        ("sitemapindex.xml", include_str!("../../testdata/sitemapindex.xml")),
        ("sitemap-pages.xml", include_str!("../../testdata/sitemap-pages.xml")),
        ("sitemap-blog.xml", include_str!("../../testdata/sitemap-blog.xml")),
        ("sitemap-news.xml", include_str!("../../testdata/sitemap-news.xml")),
    ];

    // Serves every fixture at /<name>, with HOST pointing back at the server
    async fn fixture_server() -> MockServer {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        for (name, body) in FIXTURES {
            Mock::given(method("GET"))
                .and(path(format!("/{}", name)))
                .respond_with(ResponseTemplate::new(200).set_body_string(body.replace("HOST", &host)))
                .mount(&server)
                .await;
        }

        server
    }

    fn resolver(interval: Duration) -> Resolver {
        Resolver::new(ResolverConfig::default().with_interval(interval)).unwrap()
    }

    // Synthetic fetcher serving documents from a map, 404 for anything else
    fn fetch_from_map(docs: HashMap<String, String>) -> impl Fetch {
        from_fn(move |url: &str| {
            docs.get(url)
                .map(|doc| doc.as_bytes().to_vec())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        })
    }

    #[tokio::test]
    async fn test_get_flat_sitemap() {
        let server = fixture_server().await;

        let sitemap = resolver(Duration::ZERO)
            .get(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(sitemap.len(), 13);
    }

    #[tokio::test]
    async fn test_get_empty_sitemap_is_error() {
        let server = fixture_server().await;
        let url = format!("{}/emptymap.xml", server.uri());

        let err = resolver(Duration::ZERO).get(&url).await.unwrap_err();
        assert!(matches!(err, Error::EmptySitemap(ref u) if *u == url));
    }

    #[tokio::test]
    async fn test_get_sitemap_index_flattens_children_in_order() {
        let server = fixture_server().await;

        let sitemap = resolver(Duration::from_nanos(1))
            .get(&format!("{}/sitemapindex.xml", server.uri()))
            .await
            .unwrap();

        assert_eq!(sitemap.len(), 39);
        assert_eq!(sitemap.entries[0].location, "http://www.example.com/pages/");
        assert_eq!(sitemap.entries[12].location, "http://www.example.com/pages/contact");
        assert_eq!(sitemap.entries[13].location, "http://www.example.com/blog-archive/");
        assert_eq!(sitemap.entries[26].location, "http://www.example.com/news/");
        assert_eq!(sitemap.entries[38].location, "http://www.example.com/news/contact");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let server = fixture_server().await;

        let err = resolver(Duration::ZERO)
            .get(&format!("{}/missing.xml", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_get_unreachable() {
        let err = resolver(Duration::ZERO)
            .get("http://127.0.0.1:1/sitemap.xml")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_child_failure_aborts_resolution() {
        let server = fixture_server().await;
        let index = format!(
            "<sitemapindex><sitemap><loc>{0}/sitemap.xml</loc></sitemap>\
             <sitemap><loc>{0}/gone.xml</loc></sitemap></sitemapindex>",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/broken-index.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index))
            .mount(&server)
            .await;

        let err = resolver(Duration::ZERO)
            .get(&format!("{}/broken-index.xml", server.uri()))
            .await
            .unwrap_err();
        match err {
            Error::Fetch(e) => assert!(e.url().ends_with("/gone.xml")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_larger_interval_takes_longer() {
        let server = fixture_server().await;
        let url = format!("{}/sitemapindex.xml", server.uri());

        let started = Instant::now();
        resolver(Duration::ZERO).get(&url).await.unwrap();
        let fast = started.elapsed();

        let started = Instant::now();
        resolver(Duration::from_millis(100)).get(&url).await.unwrap();
        let slow = started.elapsed();

        // Three children means two pauses
        assert!(slow >= Duration::from_millis(200));
        assert!(slow > fast);
    }

    #[tokio::test]
    async fn test_set_interval() {
        let mut resolver = resolver(Duration::from_secs(1));
        let interval = Duration::from_secs(3);
        resolver.set_interval(interval);

        assert_eq!(resolver.interval(), interval);
        assert_ne!(resolver.interval(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_set_fetcher() {
        let mut resolver = resolver(Duration::ZERO);
        resolver.set_fetcher(from_fn(|url: &str| Ok(url.as_bytes().to_vec())));

        let url = "http://example.com";
        let data = resolver.fetch(url).await.unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), url);

        // An echoed URL is not an XML document
        let err = resolver.get(url).await.unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::NoRootElement)));
    }

    #[tokio::test]
    async fn test_nested_index() {
        let docs = HashMap::from([
            (
                "mem://root".to_string(),
                "<sitemapindex><sitemap><loc>mem://inner</loc></sitemap>\
                 <sitemap><loc>mem://c</loc></sitemap></sitemapindex>"
                    .to_string(),
            ),
            (
                "mem://inner".to_string(),
                "<sitemapindex><sitemap><loc>mem://a</loc></sitemap>\
                 <sitemap><loc>mem://b</loc></sitemap></sitemapindex>"
                    .to_string(),
            ),
            ("mem://a".to_string(), "<urlset><url><loc>http://a/</loc></url></urlset>".to_string()),
            ("mem://b".to_string(), "<urlset><url><loc>http://b/</loc></url></urlset>".to_string()),
            ("mem://c".to_string(), "<urlset><url><loc>http://c/</loc></url></urlset>".to_string()),
        ]);
        let resolver = Resolver::with_fetcher(
            fetch_from_map(docs),
            ResolverConfig::default().with_interval(Duration::ZERO),
        );

        let sitemap = resolver.get("mem://root").await.unwrap();
        assert_eq!(
            sitemap.locations().collect::<Vec<_>>(),
            vec!["http://a/", "http://b/", "http://c/"]
        );
    }

    #[tokio::test]
    async fn test_self_referencing_index_hits_depth_limit() {
        let docs = HashMap::from([(
            "mem://loop".to_string(),
            "<sitemapindex><sitemap><loc>mem://loop</loc></sitemap></sitemapindex>".to_string(),
        )]);
        let resolver = Resolver::with_fetcher(
            fetch_from_map(docs),
            ResolverConfig::default()
                .with_interval(Duration::ZERO)
                .with_max_depth(3),
        );

        let err = resolver.get("mem://loop").await.unwrap_err();
        assert!(matches!(err, Error::TooDeep { max_depth: 3, .. }));
    }

    #[tokio::test]
    async fn test_empty_index_is_error() {
        let docs = HashMap::from([("mem://index".to_string(), "<sitemapindex/>".to_string())]);
        let resolver = Resolver::with_fetcher(fetch_from_map(docs), ResolverConfig::default());

        let err = resolver.get("mem://index").await.unwrap_err();
        assert!(matches!(err, Error::EmptySitemap(_)));
    }

    #[tokio::test]
    async fn test_unknown_document_is_decode_error() {
        let docs = HashMap::from([("mem://feed".to_string(), "<rss><channel/></rss>".to_string())]);
        let resolver = Resolver::with_fetcher(fetch_from_map(docs), ResolverConfig::default());

        let err = resolver.get("mem://feed").await.unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::UnknownRoot(_))));
        assert_eq!(err.stage(), "decode");
    }
}
