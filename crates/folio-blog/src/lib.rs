//! Markdown-frontmatter blog store for folio.
//!
//! A flat directory of `*.md` files is the database: each file carries a
//! YAML metadata header and a markdown body. Sample content is written by
//! an explicit seeding step at process start, never as a side effect of
//! the read path.

pub mod models;
pub mod seed;
pub mod store;

pub use models::BlogPost;
pub use seed::ensure_seeded;
pub use store::BlogStore;
