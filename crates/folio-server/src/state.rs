use folio_blog::BlogStore;
use folio_core::AppConfig;
use folio_github::GithubClient;
use folio_scrape::MetadataScraper;
use std::sync::Arc;

/// Shared application state for the server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub github: Arc<GithubClient>,
    pub blog: Arc<BlogStore>,
    pub scraper: Arc<MetadataScraper>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let github = Arc::new(GithubClient::new(
            config.github.api_base.clone(),
            config.github.token.clone(),
        ));
        let blog = Arc::new(BlogStore::new(config.blog_dir()));
        let scraper = Arc::new(MetadataScraper::new(
            &config.scrape.user_agent,
            config.scrape.timeout_secs,
        ));

        Self {
            config,
            github,
            blog,
            scraper,
        }
    }
}
