use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LETTERBOXD_URL: &str = "https://letterboxd.com";
pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Watchlist entries per listing page (7 rows x 4 columns)
pub const DEFAULT_PAGE_SIZE: usize = 28;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub letterboxd: LetterboxdConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterboxdConfig {
    pub username: String,
    #[serde(default = "default_letterboxd_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// ISO 3166-1 alpha-2 code used to pick the availability region
    pub country: String,
    #[serde(default = "default_tmdb_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Titles resolved in parallel within one listing page
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

fn default_letterboxd_url() -> String {
    DEFAULT_LETTERBOXD_URL.to_string()
}

fn default_tmdb_url() -> String {
    DEFAULT_TMDB_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_concurrency() -> usize {
    4
}

impl Config {
    /// Config with every optional setting at its default
    pub fn new(username: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            letterboxd: LetterboxdConfig {
                username: username.into(),
                base_url: default_letterboxd_url(),
                page_size: default_page_size(),
                user_agent: default_user_agent(),
            },
            tmdb: TmdbConfig {
                country: country.into(),
                base_url: default_tmdb_url(),
            },
            resolution: ResolutionConfig::default(),
        }
    }

    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.letterboxd.username.trim().is_empty() {
            return Err(anyhow::anyhow!("letterboxd.username is required and cannot be empty"));
        }

        let country = &self.tmdb.country;
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow::anyhow!(
                "tmdb.country must be a two-letter country code, got '{}'",
                country
            ));
        }

        if self.letterboxd.page_size == 0 {
            return Err(anyhow::anyhow!("letterboxd.page_size must be greater than zero"));
        }

        if self.resolution.concurrency == 0 {
            return Err(anyhow::anyhow!("resolution.concurrency must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::new("wombatbat", "PL");
        config.resolution.concurrency = 2;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.letterboxd.username, "wombatbat");
        assert_eq!(loaded.tmdb.country, "PL");
        assert_eq!(loaded.resolution.concurrency, 2);
        assert_eq!(loaded.letterboxd.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_config_defaults_when_omitted() {
        let config: Config = toml::from_str(
            r#"
            [letterboxd]
            username = "wombatbat"

            [tmdb]
            country = "PL"
            "#,
        )
        .unwrap();

        assert_eq!(config.letterboxd.base_url, DEFAULT_LETTERBOXD_URL);
        assert_eq!(config.letterboxd.page_size, 28);
        assert_eq!(config.letterboxd.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_URL);
        assert_eq!(config.resolution.concurrency, 4);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new("", "PL");
        assert!(config.validate().is_err());

        config.letterboxd.username = "wombatbat".to_string();
        assert!(config.validate().is_ok());

        config.tmdb.country = "POL".to_string();
        assert!(config.validate().is_err());
        config.tmdb.country = "P1".to_string();
        assert!(config.validate().is_err());
        config.tmdb.country = "US".to_string();

        config.letterboxd.page_size = 0;
        assert!(config.validate().is_err());
        config.letterboxd.page_size = 28;

        config.resolution.concurrency = 0;
        assert!(config.validate().is_err());
    }
}
