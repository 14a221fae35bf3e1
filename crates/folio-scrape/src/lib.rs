//! Webpage metadata scraper for folio.
//!
//! Fetches a URL and extracts title, description, site name, and favicon
//! from the HTML head, resolving relative favicon paths against the page
//! origin. Target URLs are validated against internal/private addresses
//! before any request is made.

pub mod metadata;
pub mod validate;

pub use metadata::{extract_metadata, MetadataScraper, PageMetadata};
pub use validate::validate_url;
