use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use folio_blog::BlogPost;
use serde::Deserialize;
use serde_json::{json, Value};

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(json!({ "error": message })))
}

// ── Health ──────────────────────────────────────────────────────────────

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ── GitHub activity ─────────────────────────────────────────────────────

pub fn github_routes() -> Router<AppState> {
    Router::new().route("/api/github", get(github_summary))
}

#[derive(Debug, Deserialize)]
struct GithubQuery {
    /// Optional handle override; defaults to the configured account.
    user: Option<String>,
}

async fn github_summary(
    State(state): State<AppState>,
    Query(query): Query<GithubQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let handle = query
        .user
        .unwrap_or_else(|| state.config.github.username.clone());

    match folio_github::summarize(state.github.as_ref(), &handle).await {
        Ok(summary) => Ok(Json(summary)),
        Err(err) => {
            tracing::error!("activity aggregation for {handle} failed: {err}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch GitHub data",
            ))
        }
    }
}

// ── Blog ────────────────────────────────────────────────────────────────

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/blog", get(list_posts))
        .route("/api/blog/{slug}", get(get_post))
}

async fn list_posts(State(state): State<AppState>) -> Json<Vec<BlogPost>> {
    Json(state.blog.all_posts())
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ErrorResponse> {
    state
        .blog
        .post(&slug)
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Blog post not found"))
}

// ── Metadata ────────────────────────────────────────────────────────────

pub fn metadata_routes() -> Router<AppState> {
    Router::new().route("/api/metadata", get(fetch_metadata))
}

#[derive(Debug, Deserialize)]
struct MetadataQuery {
    url: Option<String>,
}

async fn fetch_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Some(url) = query.url else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "URL parameter is required",
        ));
    };

    // Reject invalid or internal targets before any request goes out.
    if let Err(err) = folio_scrape::validate_url(&url) {
        return Err(error_response(StatusCode::BAD_REQUEST, &err.to_string()));
    }

    match state.scraper.fetch(&url).await {
        Ok(metadata) => Ok(Json(metadata)),
        Err(err) => {
            tracing::warn!("metadata fetch for {url} failed: {err}");
            Err(error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch metadata",
            ))
        }
    }
}
