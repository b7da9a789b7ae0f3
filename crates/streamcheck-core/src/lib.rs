pub mod error;
pub mod pagination;
pub mod settings;
pub mod watchlist;

pub use error::WatchlistError;
pub use pagination::page_count;
pub use settings::ReportSettings;
pub use watchlist::WatchlistSource;
