use streamcheck_sources::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("watchlist page has no count heading")]
    MissingCountHeading,

    #[error("could not read the watchlist size from heading '{0}'")]
    CountHeading(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}
