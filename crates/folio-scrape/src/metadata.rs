//! Metadata extraction from fetched HTML.

use crate::validate::validate_url;
use folio_core::{FolioError, Result};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Metadata scraped from a webpage head.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(rename = "siteName")]
    pub site_name: String,
    pub favicon: String,
}

/// Fetches a page and extracts its metadata.
pub struct MetadataScraper {
    client: reqwest::Client,
}

impl MetadataScraper {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch `raw_url` and extract its metadata. The URL is validated
    /// against internal targets before the request goes out.
    pub async fn fetch(&self, raw_url: &str) -> Result<PageMetadata> {
        let url = validate_url(raw_url)?;
        tracing::debug!("fetching metadata for {url}");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FolioError::Scrape(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::Scrape(format!(
                "upstream returned HTTP {}",
                status.as_u16()
            )));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| FolioError::Scrape(format!("Failed to read response body: {}", e)))?;

        Ok(extract_metadata(&html, &url))
    }
}

/// Pull title, description, site name, and favicon out of an HTML
/// document. Relative favicon paths are made absolute against the page
/// origin; a page with no favicon link gets `/favicon.ico`.
pub fn extract_metadata(html: &str, base: &Url) -> PageMetadata {
    let doc = Html::parse_document(html);

    let title = element_text(&doc, "title")
        .or_else(|| meta_content(&doc, "meta[property=\"og:title\"]"))
        .unwrap_or_default();

    let description = meta_content(&doc, "meta[name=\"description\"]")
        .or_else(|| meta_content(&doc, "meta[property=\"og:description\"]"))
        .unwrap_or_default();

    let site_name = meta_content(&doc, "meta[property=\"og:site_name\"]").unwrap_or_default();

    let favicon = link_href(&doc, "link[rel=\"icon\"]")
        .or_else(|| link_href(&doc, "link[rel=\"shortcut icon\"]"))
        .or_else(|| link_href(&doc, "link[rel=\"apple-touch-icon\"]"))
        .unwrap_or_else(|| "/favicon.ico".to_string());

    PageMetadata {
        title,
        description,
        site_name,
        favicon: absolutize(&favicon, base),
    }
}

fn element_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let text: String = doc.select(&sel).next()?.text().collect();
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    attr_value(doc, selector, "content")
}

fn link_href(doc: &Html, selector: &str) -> Option<String> {
    attr_value(doc, selector, "href")
}

fn attr_value(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let value = doc.select(&sel).next()?.value().attr(attr)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Resolve a favicon path against the page origin. Absolute URLs pass
/// through untouched.
fn absolutize(favicon: &str, base: &Url) -> String {
    if favicon.starts_with("http") {
        return favicon.to_string();
    }
    let origin = base.origin().ascii_serialization();
    if favicon.starts_with('/') {
        format!("{}{}", origin, favicon)
    } else {
        format!("{}/{}", origin, favicon)
    }
}
