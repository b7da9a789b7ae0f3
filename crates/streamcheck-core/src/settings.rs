use streamcheck_config::Config;

/// Everything one report run needs, resolved once at startup and passed
/// down explicitly.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub username: String,
    pub country: String,
    pub letterboxd_url: String,
    pub tmdb_url: String,
    pub user_agent: String,
    pub page_size: usize,
    pub concurrency: usize,
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            username: config.letterboxd.username.clone(),
            country: config.tmdb.country.to_uppercase(),
            letterboxd_url: config.letterboxd.base_url.clone(),
            tmdb_url: config.tmdb.base_url.clone(),
            user_agent: config.letterboxd.user_agent.clone(),
            page_size: config.letterboxd.page_size.max(1),
            concurrency: config.resolution.concurrency.max(1),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from_config(&Config::new("", "US"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamcheck_config::DEFAULT_PAGE_SIZE;

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::new("wombatbat", "pl");
        config.resolution.concurrency = 0;
        let settings = ReportSettings::from_config(&config);

        assert_eq!(settings.username, "wombatbat");
        assert_eq!(settings.country, "PL");
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.concurrency, 1);
    }
}
