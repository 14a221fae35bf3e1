//! GitHub activity aggregation for folio.
//!
//! Fetches a user's profile, repositories, per-repository language
//! breakdowns, and recent public events, and produces a normalized
//! `ActivitySummary`: language histogram, 30-day activity buckets,
//! event-type counts, rolling totals, and a recent-commit feed.

pub mod aggregator;
pub mod classify;
pub mod client;
pub mod models;

pub use aggregator::{summarize, summarize_at};
pub use classify::{classify, CommitKind};
pub use client::{GithubApi, GithubClient};
pub use models::{ActivitySummary, Event, Profile, RecentCommit, RepoSummary, UserSummary};
