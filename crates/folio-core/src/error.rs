use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The primary profile/repository/event fetch failed. Fatal for the
    /// whole aggregation call; the message stays generic so upstream
    /// detail never leaks to API consumers.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Blog store error: {0}")]
    Blog(String),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
