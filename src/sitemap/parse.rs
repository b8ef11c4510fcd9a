// src/sitemap/parse.rs
// =============================================================================
// Decodes sitemap XML.
//
// Decoding happens in two passes:
// 1. root_element() streams through the whole document with quick-xml's
//    Reader. It rejects malformed XML and reports the root element name.
// 2. The bytes are deserialized with quick_xml::de into raw serde structs,
//    which are then cleaned up (trimmed, priority parsed) into our types.
//
// Step 1 matters: serde ignores the root tag name, so an index document
// deserialized as a <urlset> would "succeed" with zero entries.
// =============================================================================

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use super::{Document, Sitemap, SitemapIndex, SitemapIndexEntry, UrlEntry};
use crate::error::DecodeError;

const URLSET: &str = "urlset";
const SITEMAP_INDEX: &str = "sitemapindex";

// Raw shapes as they appear on the wire. Unknown elements and attributes
// (xmlns, image:image, news:news, ...) are ignored by serde.
#[derive(Debug, Deserialize)]
struct RawUrlSet {
    #[serde(rename = "url", default)]
    urls: Vec<RawUrl>,
}

#[derive(Debug, Deserialize)]
struct RawUrl {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIndex {
    #[serde(rename = "sitemap", default)]
    sitemaps: Vec<RawIndexEntry>,
}

#[derive(Debug, Deserialize)]
struct RawIndexEntry {
    loc: Option<String>,
    lastmod: Option<String>,
}

/// Returns the local name of the document's root element.
///
/// Reads the entire document, so truncated or mismatched markup anywhere is
/// reported here as a DecodeError.
pub fn root_element(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut root: Option<String> = None;
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                open.push(name);
            }
            Event::Empty(ref e) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.pop() {
        return Err(DecodeError::Truncated(unclosed));
    }

    root.ok_or(DecodeError::NoRootElement)
}

/// Decodes a `<urlset>` document.
///
/// A well-formed urlset with no `<url>` children is a valid, empty Sitemap.
/// Any other root element (including `<sitemapindex>`) is an error.
pub fn parse_sitemap(bytes: &[u8]) -> Result<Sitemap, DecodeError> {
    expect_root(bytes, URLSET)?;
    decode_urlset(bytes)
}

/// Decodes a `<sitemapindex>` document without fetching any child.
pub fn parse_sitemap_index(bytes: &[u8]) -> Result<SitemapIndex, DecodeError> {
    expect_root(bytes, SITEMAP_INDEX)?;
    decode_index(bytes)
}

/// Decodes either document shape, choosing by root element.
pub fn parse_document(bytes: &[u8]) -> Result<Document, DecodeError> {
    match root_element(bytes)?.as_str() {
        URLSET => decode_urlset(bytes).map(Document::Sitemap),
        SITEMAP_INDEX => decode_index(bytes).map(Document::Index),
        other => Err(DecodeError::UnknownRoot(other.to_string())),
    }
}

fn expect_root(bytes: &[u8], expected: &'static str) -> Result<(), DecodeError> {
    let found = root_element(bytes)?;
    if found != expected {
        return Err(DecodeError::UnexpectedRoot { expected, found });
    }
    Ok(())
}

fn decode_urlset(bytes: &[u8]) -> Result<Sitemap, DecodeError> {
    let raw: RawUrlSet = quick_xml::de::from_reader(bytes)?;

    raw.urls
        .into_iter()
        .enumerate()
        .map(|(index, url)| -> Result<UrlEntry, DecodeError> {
            let location = non_blank(url.loc).ok_or(DecodeError::MissingLocation { index })?;
            let priority = match non_blank(url.priority) {
                Some(value) => Some(
                    value
                        .parse::<f32>()
                        .map_err(|_| DecodeError::InvalidPriority { index, value })?,
                ),
                None => None,
            };

            Ok(UrlEntry {
                location,
                last_modified: non_blank(url.lastmod),
                change_frequency: non_blank(url.changefreq),
                priority,
            })
        })
        .collect()
}

fn decode_index(bytes: &[u8]) -> Result<SitemapIndex, DecodeError> {
    let raw: RawIndex = quick_xml::de::from_reader(bytes)?;

    let children = raw
        .sitemaps
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<SitemapIndexEntry, DecodeError> {
            Ok(SitemapIndexEntry {
                location: non_blank(entry.loc).ok_or(DecodeError::MissingLocation { index })?,
                last_modified: non_blank(entry.lastmod),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SitemapIndex { children })
}

// Trims element text; empty text counts as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
