use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::feed::SortOption;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (session file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the news REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Sort order used when none is given: "newest", "oldest" or "popular"
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Recency window for picking the hero article
    #[serde(default = "default_hero_window_days")]
    pub hero_window_days: u32,
    /// Number of side headlines shown next to the hero
    #[serde(default = "default_hero_side_count")]
    pub hero_side_count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            hero_window_days: default_hero_window_days(),
            hero_side_count: default_hero_side_count(),
        }
    }
}

impl FeedConfig {
    /// Configured default sort; unknown labels mean input order
    pub fn sort_option(&self) -> Option<SortOption> {
        SortOption::from_label(&self.default_sort)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newshub")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://daily-positive-news.vercel.app".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_sort() -> String {
    "newest".to_string()
}

const MAX_HERO_WINDOW_DAYS: u32 = 36_500;

fn default_hero_window_days() -> u32 {
    7
}

fn default_hero_side_count() -> usize {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults if it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::Error::Config(format!(
                "api.base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(crate::Error::Config(
                "api.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.feed.hero_window_days > MAX_HERO_WINDOW_DAYS {
            return Err(crate::Error::Config(format!(
                "feed.hero_window_days must be at most {}, got {}",
                MAX_HERO_WINDOW_DAYS, self.feed.hero_window_days
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newshub/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newshub")
            .join("config.toml")
    }

    /// Get the session file path
    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://daily-positive-news.vercel.app");
        assert_eq!(config.feed.hero_window_days, 7);
        assert_eq!(config.feed.hero_side_count, 3);
        assert_eq!(config.feed.sort_option(), Some(SortOption::Newest));
        assert!(config.session_path().ends_with("newshub/session.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:3000\"\n\n[feed]\ndefault_sort = \"popular\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.feed.sort_option(), Some(SortOption::Popular));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.feed.default_sort, "newest");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"ftp://example.com\"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_rejects_oversized_hero_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\nhero_window_days = 100000000\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        std::fs::write(&path, "[feed]\nhero_window_days = 36500\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.feed.hero_window_days, 36_500);
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = AppConfig::default();
        config.general.data_dir = PathBuf::from("~/news");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.data_dir(), home.join("news"));
        }
    }
}
