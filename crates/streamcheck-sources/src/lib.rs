pub mod error;
pub mod http;
pub mod letterboxd;
pub mod lookup;
pub mod progress;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use http::{HttpClient, HttpResponse};
pub use letterboxd::{LetterboxdClient, ListingPage};
pub use lookup::Lookup;
pub use progress::{NoProgress, ProgressReporter, ResolutionTracker};
pub use tmdb::TmdbClient;
pub use traits::MetadataProvider;
