// src/sitemap/mod.rs
// =============================================================================
// The sitemap data model and the XML document parser.
//
// Two document shapes exist in the sitemaps protocol:
// - <urlset>: a flat list of page URLs (Sitemap)
// - <sitemapindex>: a list of other sitemap documents (SitemapIndex)
//
// Parsing is pure: bytes in, value or DecodeError out. Fetching and
// resolving indexes lives in the `resolve` module.
// =============================================================================

mod parse;

use serde::{Deserialize, Serialize};

pub use parse::{parse_document, parse_sitemap, parse_sitemap_index, root_element};

/// One page listed in a flat sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Absolute URL of the page (`<loc>`).
    pub location: String,
    /// `<lastmod>`, kept as written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// `<changefreq>`, e.g. "daily". Not checked against the protocol's list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<String>,
    /// `<priority>`. Not range checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl UrlEntry {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            last_modified: None,
            change_frequency: None,
            priority: None,
        }
    }
}

/// A flat list of URL entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sitemap {
    pub entries: Vec<UrlEntry>,
}

impl Sitemap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UrlEntry> {
        self.entries.iter()
    }

    /// Iterates over just the page locations.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.location.as_str())
    }
}

impl FromIterator<UrlEntry> for Sitemap {
    fn from_iter<I: IntoIterator<Item = UrlEntry>>(iter: I) -> Self {
        Sitemap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sitemap {
    type Item = UrlEntry;
    type IntoIter = std::vec::IntoIter<UrlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Reference to a child sitemap inside an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapIndexEntry {
    /// Absolute URL of the child sitemap document.
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// The children of a `<sitemapindex>` in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapIndex {
    pub children: Vec<SitemapIndexEntry>,
}

impl SitemapIndex {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A decoded document, tagged by its root element.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Sitemap(Sitemap),
    Index(SitemapIndex),
}
