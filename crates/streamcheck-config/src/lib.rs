pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{
    Config, LetterboxdConfig, ResolutionConfig, TmdbConfig, DEFAULT_LETTERBOXD_URL,
    DEFAULT_PAGE_SIZE, DEFAULT_TMDB_URL, DEFAULT_USER_AGENT,
};
pub use credentials::CredentialStore;
pub use paths::{base_path_override, PathManager};
