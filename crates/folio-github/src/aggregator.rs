//! The activity aggregation pipeline.
//!
//! Turns the raw GitHub event stream into day-bucketed counts, type
//! histograms, rolling totals, and a trimmed recent-commit feed. Every
//! summary is computed fresh; nothing here is cached or persisted.

use crate::classify::classify;
use crate::client::GithubApi;
use crate::models::{ActivitySummary, Event, EventKind, RecentCommit, RepoSummary, UserSummary};
use chrono::{Duration, NaiveDate, Utc};
use folio_core::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Number of UTC calendar days in the activity window, ending today.
const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Maximum entries in the recent-commit feed.
const RECENT_COMMIT_LIMIT: usize = 10;

/// Summarize a user's recent GitHub activity.
///
/// Fails with `UpstreamFetch` when any of the three primary fetches
/// (profile, repositories, events) fails; per-repository language
/// breakdown failures are isolated and only logged.
pub async fn summarize(api: &dyn GithubApi, handle: &str) -> Result<ActivitySummary> {
    summarize_at(api, handle, Utc::now().date_naive()).await
}

/// Like [`summarize`], with an explicit "today" for a fixed clock in tests.
pub async fn summarize_at(
    api: &dyn GithubApi,
    handle: &str,
    today: NaiveDate,
) -> Result<ActivitySummary> {
    // The three primary fetches run concurrently; the first failure
    // aborts the whole call.
    let (profile, repos, raw_events) =
        tokio::try_join!(api.user(handle), api.repos(handle), api.events(handle))?;

    let mut events = parse_events(raw_events);
    // Newest first. The feed already arrives sorted; a stable sort keeps
    // arrival order for equal timestamps.
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let languages = language_histogram(api, &repos).await;
    let (total_commits, total_prs, total_issues) = event_totals(&events);

    Ok(ActivitySummary {
        user: UserSummary::from_profile(profile, handle),
        languages,
        activity_data: bucket_by_day(&events, today),
        activity_types: type_histogram(&events),
        total_commits,
        total_prs,
        total_issues,
        recent_commits: recent_commits(&events, RECENT_COMMIT_LIMIT),
    })
}

/// Decode the events payload, degrading a malformed body to an empty list.
fn parse_events(raw: Value) -> Vec<Event> {
    match serde_json::from_value(raw) {
        Ok(events) => events,
        Err(err) => {
            warn!("events payload is not an event list, treating as empty: {err}");
            Vec::new()
        }
    }
}

/// Count language appearances across all repositories: +1 for a declared
/// primary language, +1 per key of the language-breakdown endpoint.
/// Breakdown fetches run sequentially in repository order; one repository
/// failing must not abort the rest.
async fn language_histogram(api: &dyn GithubApi, repos: &[RepoSummary]) -> HashMap<String, u32> {
    let mut histogram: HashMap<String, u32> = HashMap::new();

    for repo in repos {
        if let Some(lang) = &repo.language {
            *histogram.entry(lang.clone()).or_insert(0) += 1;
        }

        match api.languages(&repo.languages_url).await {
            Ok(breakdown) => {
                for lang in breakdown.keys() {
                    *histogram.entry(lang.clone()).or_insert(0) += 1;
                }
            }
            Err(err) => {
                warn!("language breakdown for {} failed: {err}", repo.name);
            }
        }
    }

    histogram
}

/// Bucket events into the trailing 30 UTC calendar days, oldest first,
/// ending at `today`. Events outside the window (including future-dated
/// ones) are excluded.
fn bucket_by_day(events: &[Event], today: NaiveDate) -> Vec<u32> {
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for event in events {
        let day = event.created_at.date_naive();
        let days_diff = (today - day).num_days();
        if (0..ACTIVITY_WINDOW_DAYS).contains(&days_diff) {
            *counts.entry(day).or_insert(0) += 1;
        }
    }

    (0..ACTIVITY_WINDOW_DAYS)
        .map(|i| {
            let day = today - Duration::days(ACTIVITY_WINDOW_DAYS - 1 - i);
            counts.get(&day).copied().unwrap_or(0)
        })
        .collect()
}

/// Count every event's type verbatim, over the full fetched set.
fn type_histogram(events: &[Event]) -> HashMap<String, u32> {
    let mut histogram: HashMap<String, u32> = HashMap::new();
    for event in events {
        *histogram.entry(event.kind.clone()).or_insert(0) += 1;
    }
    histogram
}

/// (commits, PRs, issues) over the full fetched set.
fn event_totals(events: &[Event]) -> (u32, u32, u32) {
    let mut commits = 0u32;
    let mut prs = 0u32;
    let mut issues = 0u32;
    for event in events {
        match event.event_kind() {
            EventKind::Push => commits += event.payload.commits.len() as u32,
            EventKind::PullRequest => prs += 1,
            EventKind::Issues => issues += 1,
            EventKind::Other => {}
        }
    }
    (commits, prs, issues)
}

/// Expand push events (newest first) into individual commits and take the
/// first `limit`. A single push event may contribute several commits, in
/// its array's given order.
fn recent_commits(events: &[Event], limit: usize) -> Vec<RecentCommit> {
    events
        .iter()
        .filter(|e| e.event_kind() == EventKind::Push)
        .flat_map(|event| {
            event.payload.commits.iter().map(move |commit| RecentCommit {
                message: commit.message.clone(),
                date: event.created_at,
                repo: event.short_repo_name().to_string(),
                kind: classify(&commit.message),
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use folio_core::FolioError;
    use serde_json::json;

    const TODAY: &str = "2024-05-20";

    fn today() -> NaiveDate {
        TODAY.parse().unwrap()
    }

    fn at_days_ago(days: i64) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &(today() - Duration::days(days))
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    fn push_event(repo: &str, days_ago: i64, messages: &[&str]) -> Value {
        json!({
            "type": "PushEvent",
            "created_at": at_days_ago(days_ago).to_rfc3339(),
            "repo": {"name": repo},
            "payload": {"commits": messages.iter().map(|m| json!({"message": m})).collect::<Vec<_>>()}
        })
    }

    fn plain_event(kind: &str, days_ago: i64) -> Value {
        json!({
            "type": kind,
            "created_at": at_days_ago(days_ago).to_rfc3339(),
            "repo": {"name": "alice/proj"},
            "payload": {}
        })
    }

    struct FakeApi {
        repos: Vec<RepoSummary>,
        events: Value,
        /// languages_url -> breakdown; urls absent here fail their fetch.
        languages: HashMap<String, HashMap<String, u64>>,
    }

    impl FakeApi {
        fn with_events(events: Value) -> Self {
            Self {
                repos: Vec::new(),
                events,
                languages: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl GithubApi for FakeApi {
        async fn user(&self, handle: &str) -> Result<Profile> {
            Ok(Profile {
                name: Some("Alice".into()),
                login: handle.to_string(),
                avatar_url: "https://example.com/a.png".into(),
                followers: 1,
                following: 2,
                public_repos: self.repos.len() as u32,
            })
        }

        async fn repos(&self, _handle: &str) -> Result<Vec<RepoSummary>> {
            Ok(self.repos.clone())
        }

        async fn events(&self, _handle: &str) -> Result<Value> {
            Ok(self.events.clone())
        }

        async fn languages(&self, url: &str) -> Result<HashMap<String, u64>> {
            self.languages
                .get(url)
                .cloned()
                .ok_or_else(|| FolioError::UpstreamFetch("upstream returned HTTP 403".into()))
        }
    }

    #[tokio::test]
    async fn test_zero_events() {
        let api = FakeApi::with_events(json!([]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        assert_eq!(summary.activity_data, vec![0; 30]);
        assert!(summary.languages.is_empty());
        assert!(summary.activity_types.is_empty());
        assert_eq!(summary.total_commits, 0);
        assert_eq!(summary.total_prs, 0);
        assert_eq!(summary.total_issues, 0);
        assert!(summary.recent_commits.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_events_payload_degrades_to_empty() {
        let api = FakeApi::with_events(json!({"message": "API rate limit exceeded"}));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        // Identical to zero events for every event-derived field.
        assert_eq!(summary.activity_data, vec![0; 30]);
        assert!(summary.activity_types.is_empty());
        assert_eq!(summary.total_commits, 0);
        assert!(summary.recent_commits.is_empty());
    }

    #[tokio::test]
    async fn test_activity_window_has_thirty_entries_today_last() {
        let api = FakeApi::with_events(json!([
            push_event("alice/proj", 0, &["Add thing"]),
            push_event("alice/proj", 0, &["Fix thing"]),
            plain_event("IssuesEvent", 5),
        ]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        assert_eq!(summary.activity_data.len(), 30);
        // Oldest first: today is the last entry.
        assert_eq!(summary.activity_data[29], 2);
        assert_eq!(summary.activity_data[24], 1);
        assert_eq!(summary.activity_data.iter().sum::<u32>(), 3);
    }

    #[tokio::test]
    async fn test_window_edges() {
        let api = FakeApi::with_events(json!([
            plain_event("WatchEvent", 29),
            plain_event("WatchEvent", 30),
            plain_event("WatchEvent", -1),
        ]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        // Only the 29-day event lands in the window, at the oldest slot.
        assert_eq!(summary.activity_data[0], 1);
        assert_eq!(summary.activity_data.iter().sum::<u32>(), 1);
        // The type histogram still covers the full fetched set.
        assert_eq!(summary.activity_types["WatchEvent"], 3);
    }

    #[tokio::test]
    async fn test_push_event_expansion() {
        let api = FakeApi::with_events(json!([push_event(
            "alice/proj",
            1,
            &["Add a", "Fix b", "Update readme"]
        )]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        assert_eq!(summary.total_commits, 3);
        assert_eq!(summary.recent_commits.len(), 3);
        for commit in &summary.recent_commits {
            assert_eq!(commit.repo, "proj");
        }
        assert_eq!(summary.recent_commits[0].message, "Add a");
    }

    #[tokio::test]
    async fn test_recent_commits_capped_at_ten_in_expansion_order() {
        // Two push events, newest first after sorting: 6 commits then 6 more.
        let api = FakeApi::with_events(json!([
            push_event("alice/old", 3, &["o1", "o2", "o3", "o4", "o5", "o6"]),
            push_event("alice/new", 1, &["n1", "n2", "n3", "n4", "n5", "n6"]),
        ]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        assert_eq!(summary.total_commits, 12);
        assert_eq!(summary.recent_commits.len(), 10);
        let messages: Vec<&str> = summary
            .recent_commits
            .iter()
            .map(|c| c.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["n1", "n2", "n3", "n4", "n5", "n6", "o1", "o2", "o3", "o4"]
        );
    }

    #[tokio::test]
    async fn test_totals_and_type_histogram() {
        let api = FakeApi::with_events(json!([
            push_event("alice/proj", 1, &["Add a", "Add b"]),
            plain_event("PullRequestEvent", 2),
            plain_event("PullRequestEvent", 40),
            plain_event("IssuesEvent", 3),
            plain_event("ForkEvent", 4),
        ]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();

        // Totals cover the full fetched set, not just the 30-day window.
        assert_eq!(summary.total_commits, 2);
        assert_eq!(summary.total_prs, 2);
        assert_eq!(summary.total_issues, 1);
        assert_eq!(summary.activity_types["PushEvent"], 1);
        assert_eq!(summary.activity_types["ForkEvent"], 1);
    }

    #[tokio::test]
    async fn test_language_double_count() {
        let mut api = FakeApi::with_events(json!([]));
        api.repos = vec![RepoSummary {
            name: "proj".into(),
            language: Some("Go".into()),
            languages_url: "https://api.example/repos/alice/proj/languages".into(),
        }];
        api.languages.insert(
            "https://api.example/repos/alice/proj/languages".into(),
            HashMap::from([("Go".to_string(), 1000u64), ("Shell".to_string(), 20u64)]),
        );

        let summary = summarize_at(&api, "alice", today()).await.unwrap();
        // Primary +1, breakdown key +1: appearance count, never byte-weighted.
        assert_eq!(summary.languages["Go"], 2);
        assert_eq!(summary.languages["Shell"], 1);
    }

    #[tokio::test]
    async fn test_language_breakdown_failure_is_isolated() {
        let mut api = FakeApi::with_events(json!([]));
        api.repos = vec![
            RepoSummary {
                name: "broken".into(),
                language: Some("Rust".into()),
                languages_url: "https://api.example/broken/languages".into(),
            },
            RepoSummary {
                name: "ok".into(),
                language: None,
                languages_url: "https://api.example/ok/languages".into(),
            },
        ];
        // Only the second repo's breakdown resolves.
        api.languages.insert(
            "https://api.example/ok/languages".into(),
            HashMap::from([("Python".to_string(), 10u64)]),
        );

        let summary = summarize_at(&api, "alice", today()).await.unwrap();
        // The failing repo still contributes its primary language.
        assert_eq!(summary.languages["Rust"], 1);
        assert_eq!(summary.languages["Python"], 1);
    }

    #[tokio::test]
    async fn test_events_resorted_newest_first() {
        // Feed arrives out of order; recent commits must follow timestamps.
        let api = FakeApi::with_events(json!([
            push_event("alice/older", 5, &["old commit"]),
            push_event("alice/newer", 1, &["new commit"]),
        ]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();
        assert_eq!(summary.recent_commits[0].message, "new commit");
        assert_eq!(summary.recent_commits[1].message, "old commit");
    }

    #[tokio::test]
    async fn test_profile_snippet() {
        let api = FakeApi::with_events(json!([]));
        let summary = summarize_at(&api, "alice", today()).await.unwrap();
        assert_eq!(summary.user.name, "Alice");
        assert_eq!(summary.user.login, "alice");
        assert_eq!(summary.user.followers, 1);
    }

    struct FailingApi;

    #[async_trait]
    impl GithubApi for FailingApi {
        async fn user(&self, _handle: &str) -> Result<Profile> {
            Err(FolioError::UpstreamFetch("upstream returned HTTP 500".into()))
        }
        async fn repos(&self, _handle: &str) -> Result<Vec<RepoSummary>> {
            Ok(Vec::new())
        }
        async fn events(&self, _handle: &str) -> Result<Value> {
            Ok(json!([]))
        }
        async fn languages(&self, _url: &str) -> Result<HashMap<String, u64>> {
            Ok(HashMap::new())
        }
    }

    #[tokio::test]
    async fn test_primary_fetch_failure_is_fatal() {
        let err = summarize_at(&FailingApi, "alice", today())
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::UpstreamFetch(_)));
    }
}
