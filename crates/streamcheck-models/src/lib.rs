pub mod platforms;
pub mod report;
pub mod title;

pub use platforms::PlatformCounts;
pub use report::WatchlistReport;
pub use title::Title;
