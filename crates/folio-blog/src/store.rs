//! Directory-backed post store.

use crate::models::{parse_document, BlogPost};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads posts from a flat directory of `*.md` files.
///
/// The store is read-only: a missing directory reads as empty, and a file
/// that fails to parse is skipped, never an error for the listing.
pub struct BlogStore {
    dir: PathBuf,
}

impl BlogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slugs of every markdown file in the directory, unsorted.
    pub fn slugs(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("blog directory {} not readable: {err}", self.dir.display());
                return Vec::new();
            }
        };

        entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("md") {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(str::to_string)
                } else {
                    None
                }
            })
            .collect()
    }

    /// All posts, sorted by date descending (newest first).
    pub fn all_posts(&self) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = self
            .slugs()
            .into_iter()
            .filter_map(|slug| self.post(&slug))
            .collect();
        // ISO date strings order lexically.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Load a single post by slug. Returns None for unknown slugs, files
    /// that fail to parse, and slugs that would escape the directory.
    pub fn post(&self, slug: &str) -> Option<BlogPost> {
        if !is_valid_slug(slug) {
            warn!("rejected blog slug {slug:?}");
            return None;
        }

        let path = self.dir.join(format!("{slug}.md"));
        let contents = std::fs::read_to_string(&path).ok()?;
        match parse_document(slug, &contents) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!("skipping {}: invalid frontmatter: {err}", path.display());
                None
            }
        }
    }
}

/// Slugs are plain file stems: no path separators, no parent traversal.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}
