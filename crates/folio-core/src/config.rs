use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GithubConfig,
    pub blog: BlogConfig,
    pub scrape: ScrapeConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            blog: BlogConfig::default(),
            scrape: ScrapeConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.config/folio/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Data directory for blog content and other state.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    /// Blog content directory, resolved against data_dir when unset.
    pub fn blog_dir(&self) -> PathBuf {
        self.blog
            .content_dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("content").join("blog"))
    }
}

/// GitHub API configuration for the activity aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Account handle to summarize.
    pub username: String,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Optional bearer token — raises the rate limit and unlocks the
    /// per-repository language endpoints. Falls back to the GITHUB_TOKEN
    /// environment variable when unset.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: "frinfo702".into(),
            api_base: "https://api.github.com".into(),
            token: None,
        }
    }
}

/// Blog store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Directory holding the `*.md` posts.
    pub content_dir: Option<PathBuf>,
    /// Write the bundled sample posts at startup when their files are absent.
    pub seed_samples: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            seed_samples: true,
        }
    }
}

/// Metadata scraper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// User-Agent sent with outgoing metadata requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; FolioBot/1.0)".into(),
            timeout_secs: 30,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Enable permissive CORS (the site frontend runs on another origin).
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            cors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("api.github.com"));
        assert!(toml_str.contains("127.0.0.1"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.github.username, config.github.username);
        assert_eq!(parsed.server.port, config.server.port);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[github]\nusername = \"alice\"\n").unwrap();
        assert_eq!(parsed.github.username, "alice");
        assert_eq!(parsed.github.api_base, "https://api.github.com");
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn test_blog_dir_override() {
        let mut config = AppConfig::default();
        config.blog.content_dir = Some(PathBuf::from("/tmp/posts"));
        assert_eq!(config.blog_dir(), PathBuf::from("/tmp/posts"));
    }
}
