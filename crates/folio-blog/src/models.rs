//! Blog post model and frontmatter parsing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A blog post: frontmatter metadata plus the markdown body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    /// File name without the `.md` extension.
    pub slug: String,
    pub title: String,
    /// ISO date string; posts sort lexically on this field.
    pub date: String,
    pub excerpt: String,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(rename = "readTime")]
    pub read_time: String,
    pub tags: Vec<String>,
    pub content: String,
}

/// Raw YAML header; every field optional, defaults applied on conversion.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    date: Option<String>,
    excerpt: Option<String>,
    #[serde(rename = "coverImage")]
    cover_image: Option<String>,
    #[serde(rename = "readTime")]
    read_time: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a markdown document into a post.
///
/// A missing header yields a post with all-default metadata and the full
/// file as body; a present but invalid YAML header is an error (the store
/// skips such files).
pub fn parse_document(slug: &str, contents: &str) -> Result<BlogPost, serde_yaml::Error> {
    let (header, body) = split_front_matter(contents);
    let front: FrontMatter = match header {
        Some(raw) => serde_yaml::from_str(&raw)?,
        None => FrontMatter::default(),
    };

    Ok(BlogPost {
        slug: slug.to_string(),
        title: front.title.unwrap_or_else(|| "Untitled".into()),
        date: front.date.unwrap_or_else(|| Utc::now().to_rfc3339()),
        excerpt: front.excerpt.unwrap_or_default(),
        cover_image: front.cover_image,
        read_time: front.read_time.unwrap_or_else(|| "5 min read".into()),
        tags: front.tags,
        content: body,
    })
}

/// Split a leading `---` ... `---` block from the body. Returns the raw
/// header (without delimiters) and the remaining content; an unterminated
/// header means the whole file is body.
fn split_front_matter(contents: &str) -> (Option<String>, String) {
    let mut lines = contents.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return (None, contents.to_string());
    }

    let mut header = Vec::new();
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            let body: Vec<&str> = lines.collect();
            return (Some(header.join("\n")), body.join("\n"));
        }
        header.push(line);
    }

    (None, contents.to_string())
}
