use super::report_ui::ReportUI;
use crate::output::Output;
use color_eyre::Result;
use std::sync::Arc;
use streamcheck_config::credentials::TMDB_API_KEY_ENV;
use streamcheck_config::{Config, CredentialStore, PathManager};
use streamcheck_core::{ReportSettings, WatchlistSource};

/// Command-line values that take precedence over config.toml
#[derive(Debug, Default, Clone)]
pub struct ReportOverrides {
    pub username: Option<String>,
    pub country: Option<String>,
    pub page_size: Option<usize>,
    pub concurrency: Option<usize>,
}

impl ReportOverrides {
    /// Layer the overrides on top of a stored config. Without one, username
    /// and country must both be given.
    pub fn apply(self, stored: Option<Config>) -> Result<Config> {
        let mut config = match stored {
            Some(config) => config,
            None => match (&self.username, &self.country) {
                (Some(username), Some(country)) => Config::new(username.clone(), country.clone()),
                _ => {
                    return Err(color_eyre::eyre::eyre!(
                        "No configuration found. Pass --username and --country, or run 'streamcheck config set' first."
                    ))
                }
            },
        };

        if let Some(username) = self.username {
            config.letterboxd.username = username;
        }
        if let Some(country) = self.country {
            config.tmdb.country = country.to_uppercase();
        }
        if let Some(page_size) = self.page_size {
            config.letterboxd.page_size = page_size;
        }
        if let Some(concurrency) = self.concurrency {
            config.resolution.concurrency = concurrency;
        }

        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

/// Load config.toml when present
pub fn load_stored_config(path_manager: &PathManager) -> Result<Option<Config>> {
    let config_file = path_manager.config_file();
    if !config_file.exists() {
        tracing::debug!(path = %config_file.display(), "No configuration file");
        return Ok(None);
    }
    let config = Config::load_from_file(&config_file)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
        })?;
    Ok(Some(config))
}

pub async fn run_report(overrides: ReportOverrides, output: &Output) -> Result<()> {
    tracing::debug!("Report command started");

    let path_manager = PathManager::default();
    let config = overrides.apply(load_stored_config(&path_manager)?)?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to load credentials from {}: {}",
                credentials_file.display(),
                e
            )
        })?;
    let api_key = cred_store.resolve_tmdb_api_key().ok_or_else(|| {
        color_eyre::eyre::eyre!(
            "TMDB API key not configured. Run 'streamcheck config tmdb' or set {}.",
            TMDB_API_KEY_ENV
        )
    })?;

    let settings = ReportSettings::from_config(&config);
    tracing::info!(
        username = %settings.username,
        country = %settings.country,
        concurrency = settings.concurrency,
        "Building watchlist report"
    );

    let ui = Arc::new(ReportUI::new(&settings.username, !output.is_quiet()));
    let source = WatchlistSource::from_settings(&settings, &api_key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP clients: {}", e))?
        .with_progress(ui);

    let report = source.report().await.map_err(|e| {
        color_eyre::eyre::eyre!("Failed to read {}'s watchlist: {}", source.username(), e)
    })?;

    if report.is_empty() {
        output.warn(format!(
            "No titles found for '{}'. The watchlist may be private, empty or the user may not exist.",
            source.username()
        ));
    }

    output.report(report)?;
    output.success(format!(
        "{} of {} titles streaming in {}",
        report.available_count(),
        report.titles().len(),
        source.country()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_require_username_and_country_without_config() {
        let overrides = ReportOverrides {
            username: Some("wombatbat".to_string()),
            ..ReportOverrides::default()
        };
        assert!(overrides.apply(None).is_err());
    }

    #[test]
    fn test_overrides_build_config_from_flags() {
        let overrides = ReportOverrides {
            username: Some("wombatbat".to_string()),
            country: Some("pl".to_string()),
            concurrency: Some(8),
            ..ReportOverrides::default()
        };
        let config = overrides.apply(None).unwrap();
        assert_eq!(config.letterboxd.username, "wombatbat");
        assert_eq!(config.tmdb.country, "PL");
        assert_eq!(config.resolution.concurrency, 8);
    }

    #[test]
    fn test_overrides_layer_on_stored_config() {
        let stored = Config::new("wombatbat", "PL");
        let overrides = ReportOverrides {
            country: Some("us".to_string()),
            page_size: Some(72),
            ..ReportOverrides::default()
        };
        let config = overrides.apply(Some(stored)).unwrap();
        assert_eq!(config.letterboxd.username, "wombatbat");
        assert_eq!(config.tmdb.country, "US");
        assert_eq!(config.letterboxd.page_size, 72);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = ReportOverrides {
            concurrency: Some(0),
            ..ReportOverrides::default()
        };
        assert!(overrides.apply(Some(Config::new("wombatbat", "PL"))).is_err());
    }

    #[test]
    fn test_load_stored_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        assert!(load_stored_config(&paths).unwrap().is_none());
    }
}
