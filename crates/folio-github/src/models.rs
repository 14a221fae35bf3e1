//! Data models for the GitHub event feed and the aggregated summary.

use crate::classify::CommitKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Upstream models ─────────────────────────────────────────────────────

/// Account profile as returned by `GET /users/{handle}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Display name. May be null or empty, in which case the handle is used.
    #[serde(default)]
    pub name: Option<String>,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
}

/// One repository from `GET /users/{handle}/repos`, consumed transiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    /// Declared primary language, if any.
    #[serde(default)]
    pub language: Option<String>,
    pub languages_url: String,
}

/// A single record from the public event feed.
///
/// The `type` tag is kept verbatim for the event-type histogram; only the
/// variants the aggregator inspects (push, pull request, issues) have a
/// defined payload shape, everything else passes through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    /// Full repository name, "owner/name".
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    /// Commit records carried by push events; empty for everything else.
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub message: String,
}

/// The event variants the aggregator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    Other,
}

impl Event {
    pub fn event_kind(&self) -> EventKind {
        match self.kind.as_str() {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            _ => EventKind::Other,
        }
    }

    /// Repository name without the owning-account segment.
    pub fn short_repo_name(&self) -> &str {
        self.repo
            .name
            .splitn(2, '/')
            .nth(1)
            .unwrap_or(&self.repo.name)
    }
}

// ── Aggregated output ───────────────────────────────────────────────────

/// Profile snippet embedded in the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub login: String,
    pub avatar_url: String,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
}

impl UserSummary {
    /// Build from a raw profile, falling back to the handle when the API
    /// reports no display name.
    pub fn from_profile(profile: Profile, handle: &str) -> Self {
        let name = profile
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| handle.to_string());
        Self {
            name,
            login: profile.login,
            avatar_url: profile.avatar_url,
            followers: profile.followers,
            following: profile.following,
            public_repos: profile.public_repos,
        }
    }
}

/// One entry of the recent-commit feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentCommit {
    pub message: String,
    /// Timestamp of the push event that carried the commit.
    pub date: DateTime<Utc>,
    /// Repository short name (after the owner segment).
    pub repo: String,
    /// Heuristic classification of the commit message.
    pub kind: CommitKind,
}

/// The aggregator's output, immutable once produced. Computed fresh on
/// every request; never cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub user: UserSummary,
    /// Language name -> occurrence count (per appearance, not byte-weighted).
    pub languages: HashMap<String, u32>,
    /// Exactly 30 per-day event counts, oldest first, ending at today (UTC).
    #[serde(rename = "activityData")]
    pub activity_data: Vec<u32>,
    /// Verbatim event-type histogram over the full fetched event set.
    #[serde(rename = "activityTypes")]
    pub activity_types: HashMap<String, u32>,
    #[serde(rename = "totalCommits")]
    pub total_commits: u32,
    #[serde(rename = "totalPRs")]
    pub total_prs: u32,
    #[serde(rename = "totalIssues")]
    pub total_issues: u32,
    /// At most 10 commits, expansion order newest-first.
    #[serde(rename = "recentCommits")]
    pub recent_commits: Vec<RecentCommit>,
}
