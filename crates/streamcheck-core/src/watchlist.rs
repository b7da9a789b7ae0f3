use crate::error::WatchlistError;
use crate::pagination::listing_page_count;
use crate::settings::ReportSettings;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use streamcheck_models::{Title, WatchlistReport};
use streamcheck_sources::{
    LetterboxdClient, ListingPage, MetadataProvider, NoProgress, ProgressReporter,
    ResolutionTracker, TmdbClient,
};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument, warn};

const PROGRESS_LOG_INTERVAL: usize = 25;

/// A user's watchlist resolved against a metadata provider.
///
/// The title sequence and the report are each computed at most once per
/// instance and never invalidated; the listing and provider data are treated
/// as fixed for the lifetime of a run.
pub struct WatchlistSource {
    listing: LetterboxdClient,
    provider: Arc<dyn MetadataProvider>,
    country: String,
    page_size: usize,
    concurrency: usize,
    progress: Arc<dyn ProgressReporter>,
    watchlist: OnceCell<Vec<Title>>,
    report: OnceCell<WatchlistReport>,
}

impl WatchlistSource {
    pub fn new(
        listing: LetterboxdClient,
        provider: Arc<dyn MetadataProvider>,
        settings: &ReportSettings,
    ) -> Self {
        Self {
            listing,
            provider,
            country: settings.country.clone(),
            page_size: settings.page_size.max(1),
            concurrency: settings.concurrency.max(1),
            progress: Arc::new(NoProgress),
            watchlist: OnceCell::new(),
            report: OnceCell::new(),
        }
    }

    /// Letterboxd listing resolved through TMDB
    pub fn from_settings(
        settings: &ReportSettings,
        api_key: &str,
    ) -> Result<Self, WatchlistError> {
        let listing = LetterboxdClient::new(
            &settings.letterboxd_url,
            settings.username.clone(),
            &settings.user_agent,
        )?;
        let provider = TmdbClient::new(&settings.tmdb_url, api_key, &settings.user_agent)?;
        Ok(Self::new(listing, Arc::new(provider), settings))
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn username(&self) -> &str {
        self.listing.username()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Titles in scrape order (page, then position within the page).
    ///
    /// An unreachable first page yields an empty watchlist; an unreadable
    /// count heading is an error.
    pub async fn watchlist(&self) -> Result<&[Title], WatchlistError> {
        self.watchlist
            .get_or_try_init(|| self.collect())
            .await
            .map(Vec::as_slice)
    }

    /// Per-title report plus platform counts, derived from [`Self::watchlist`]
    pub async fn report(&self) -> Result<&WatchlistReport, WatchlistError> {
        self.report
            .get_or_try_init(|| async {
                let titles = self.watchlist().await?;
                Ok::<_, WatchlistError>(WatchlistReport::from_titles(titles.to_vec()))
            })
            .await
    }

    #[instrument(skip(self), fields(username = %self.listing.username(), country = %self.country))]
    async fn collect(&self) -> Result<Vec<Title>, WatchlistError> {
        let first_page = match self.listing.fetch_page(1).await {
            Ok(page) => page,
            Err(e) => {
                error!("Watchlist unavailable, first page could not be fetched: {}", e);
                return Ok(Vec::new());
            }
        };

        let entry_count = match first_page.entry_count() {
            Some(count) => count,
            None => {
                return Err(match &first_page.heading {
                    Some(heading) => WatchlistError::CountHeading(heading.clone()),
                    None => WatchlistError::MissingCountHeading,
                })
            }
        };

        let page_count = listing_page_count(&first_page, entry_count, self.page_size);
        info!(entries = entry_count, pages = page_count, "Watchlist size");

        let mut tracker = ResolutionTracker::new(entry_count, PROGRESS_LOG_INTERVAL);
        // The heading count is remote input, so it never sizes an allocation
        let mut titles = Vec::new();

        self.progress.start(page_count.saturating_sub(1) as u64);

        titles.extend(self.resolve_page(&first_page, &mut tracker).await);

        for page_number in 2..=page_count {
            match self.listing.fetch_page(page_number).await {
                Ok(page) => titles.extend(self.resolve_page(&page, &mut tracker).await),
                Err(e) => warn!(page = page_number, error = %e, "Skipping watchlist page"),
            }
            self.progress.tick();
        }

        self.progress.finish();
        tracker.log_summary("Watchlist resolution");

        if titles.len() != entry_count {
            warn!(
                expected = entry_count,
                found = titles.len(),
                "Watchlist heading and scraped posters disagree"
            );
        }

        Ok(titles)
    }

    /// Resolve one page's titles with bounded concurrency, preserving order
    async fn resolve_page(
        &self,
        page: &ListingPage,
        tracker: &mut ResolutionTracker,
    ) -> Vec<Title> {
        tracker.record_skipped(page.skipped_posters);

        let country = self.country.as_str();
        let resolved: Vec<Title> = stream::iter(page.titles.iter())
            .map(|name| self.provider.resolve(name, country))
            .buffered(self.concurrency)
            .collect()
            .await;

        for title in &resolved {
            tracker.record(title);
            tracker.log_progress();
        }
        resolved
    }
}
