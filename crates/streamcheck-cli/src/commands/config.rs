use super::report::{load_stored_config, ReportOverrides};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use streamcheck_config::{Config, CredentialStore, PathManager};

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Set {
            username,
            country,
            page_size,
            concurrency,
        } => {
            let overrides = ReportOverrides {
                username,
                country,
                page_size,
                concurrency,
            };
            set_config(overrides, output)
        }
        crate::ConfigCommands::Tmdb { api_key, remove } => configure_tmdb(api_key, remove, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
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
    Ok(cred_store)
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = match load_stored_config(&path_manager)? {
        Some(config) => config,
        None => {
            output.warn(format!("Configuration file not found at: {}", config_file.display()));
            output.info("Run 'streamcheck config set --username <USER> --country <CC>' to create it.");
            return Ok(());
        }
    };

    let cred_store = load_credentials(&path_manager)?;
    let api_key = cred_store.get_tmdb_api_key().map(String::as_str).unwrap_or("");
    let api_key_display = if full { api_key.to_string() } else { mask_string(api_key) };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{}", "─".repeat("Configuration".len()).bright_cyan());
            println!();
            let config_path = config_file.display().to_string();
            println!("{}", settings_table(&config, &config_path, &api_key_display));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "letterboxd": {
                    "username": config.letterboxd.username,
                    "base_url": config.letterboxd.base_url,
                    "page_size": config.letterboxd.page_size,
                    "user_agent": config.letterboxd.user_agent,
                },
                "tmdb": {
                    "country": config.tmdb.country,
                    "base_url": config.tmdb.base_url,
                    "api_key": api_key_display,
                },
                "resolution": {
                    "concurrency": config.resolution.concurrency,
                },
            }));
        }
    }

    Ok(())
}

fn settings_table(config: &Config, config_file: &str, api_key_display: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let page_size = config.letterboxd.page_size.to_string();
    let concurrency = config.resolution.concurrency.to_string();
    let rows = [
        ("Config File", config_file),
        ("Letterboxd Username", config.letterboxd.username.as_str()),
        ("Letterboxd URL", config.letterboxd.base_url.as_str()),
        ("Page Size", page_size.as_str()),
        ("User Agent", config.letterboxd.user_agent.as_str()),
        ("Country", config.tmdb.country.as_str()),
        ("TMDB URL", config.tmdb.base_url.as_str()),
        ("TMDB API Key", api_key_display),
        ("Concurrency", concurrency.as_str()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn set_config(overrides: ReportOverrides, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let stored = load_stored_config(&path_manager)?;
    if stored.is_none() {
        output.info("Configuration file not found. Creating a new one...");
    }
    let config = overrides.apply(stored)?;

    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
        })?;

    output.success(format!("Configuration saved to {}", config_file.display()));
    output.info(format!("  Username: {}", config.letterboxd.username));
    output.info(format!("  Country: {}", config.tmdb.country));
    Ok(())
}

fn configure_tmdb(api_key_arg: Option<String>, remove: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let mut cred_store = load_credentials(&path_manager)?;

    if remove {
        cred_store.remove_tmdb_api_key();
        save_credentials(&cred_store)?;
        output.success("TMDB API key removed");
        return Ok(());
    }

    let api_key = match api_key_arg {
        Some(key) => key,
        None => rpassword::prompt_password("TMDB API read access token: ")
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read API key: {}", e))?,
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key is required"));
    }

    let masked = mask_string(&api_key);
    cred_store.set_tmdb_api_key(api_key);
    save_credentials(&cred_store)?;

    output.success(format!("TMDB API key saved ({})", masked));
    Ok(())
}

fn save_credentials(cred_store: &CredentialStore) -> Result<()> {
    cred_store.save().map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to save credentials to {}: {}",
            cred_store.path().display(),
            e
        )
    })
}

fn mask_string(s: &str) -> String {
    if s.trim().is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9"), "ey***J9");
    }

    #[test]
    fn test_settings_table_lists_every_setting() {
        let config = Config::new("wombatbat", "PL");
        let rendered = settings_table(&config, "/tmp/config.toml", "ey***J9").to_string();
        assert!(rendered.contains("wombatbat"));
        assert!(rendered.contains("ey***J9"));
        assert!(rendered.contains("https://api.themoviedb.org/3"));
        assert!(rendered.contains("Concurrency"));
    }
}
