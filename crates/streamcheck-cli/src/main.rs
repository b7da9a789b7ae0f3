use clap::{ArgAction, Parser, Subcommand};
use commands::{config, report};
use std::path::PathBuf;
use streamcheck_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "streamcheck")]
#[command(about = "streamcheck - Find out where your watchlist is streaming")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (defaults to the
    /// logs directory next to config.toml when no path is given)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a watchlist and print where each title is streaming
    #[command(long_about = "Scrape a Letterboxd watchlist, look every title up on TMDB and print the subscription platforms carrying it in the configured country, followed by a per-platform summary. Flags override config.toml for this run only.")]
    Report {
        /// Letterboxd username
        #[arg(long)]
        username: Option<String>,

        /// Two-letter country code for availability (e.g. PL, US)
        #[arg(long)]
        country: Option<String>,

        /// Titles per listing page
        #[arg(long)]
        page_size: Option<usize>,

        /// Title lookups in flight per page
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Configure settings and credentials
    #[command(long_about = "Manage config.toml and credentials.toml. Use subcommands to view the configuration, change report settings or store the TMDB API key.")]
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Update report settings in config.toml
    Set {
        /// Letterboxd username
        #[arg(long)]
        username: Option<String>,

        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,

        /// Titles per listing page
        #[arg(long)]
        page_size: Option<usize>,

        /// Title lookups in flight per page
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Store the TMDB API read access token
    #[command(long_about = "Store the TMDB API read access token in credentials.toml. The token is sent as a bearer token. Create one at https://www.themoviedb.org/settings/api. The TMDB_API_KEY environment variable takes precedence over the stored value.")]
    Tmdb {
        /// API token (if not provided, will prompt with hidden input)
        #[arg(long, conflicts_with = "remove")]
        api_key: Option<String>,

        /// Delete the stored token instead
        #[arg(long, action = ArgAction::SetTrue)]
        remove: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().default_log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Report {
            username,
            country,
            page_size,
            concurrency,
        } => {
            let overrides = report::ReportOverrides {
                username,
                country,
                page_size,
                concurrency,
            };
            report::run_report(overrides, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
