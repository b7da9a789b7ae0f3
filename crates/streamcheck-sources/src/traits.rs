use crate::lookup::Lookup;
use async_trait::async_trait;
use streamcheck_models::Title;
use tracing::{debug, warn};

/// Resolves free-text titles to streaming availability.
///
/// Implementations never return errors from these methods; every failure is
/// reported through [`Lookup::Failed`] so one bad title cannot abort a batch.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Identifier of the first search hit for `title`
    async fn find_identifier(&self, title: &str) -> Lookup<u64>;

    /// Subscription ("flatrate") platforms carrying `identifier` in `country`
    async fn fetch_platforms(&self, identifier: u64, country: &str) -> Lookup<Vec<String>>;

    /// Search, then fetch availability. Skips the availability call when
    /// the search did not produce an identifier.
    async fn resolve(&self, title: &str, country: &str) -> Title {
        let unresolved = Title::new(title);

        let identifier = match self.find_identifier(title).await {
            Lookup::Found(id) => id,
            Lookup::Empty => {
                warn!(
                    provider = self.provider_name(),
                    title = %title,
                    "No search results for title"
                );
                return unresolved;
            }
            Lookup::Failed(e) => {
                warn!(
                    provider = self.provider_name(),
                    title = %title,
                    error = %e,
                    "Title search failed"
                );
                return unresolved;
            }
        };

        match self.fetch_platforms(identifier, country).await {
            Lookup::Found(platforms) => {
                debug!(title = %title, id = identifier, platforms = ?platforms, "Resolved title");
                unresolved.with_platforms(platforms)
            }
            Lookup::Empty => {
                debug!(title = %title, id = identifier, country = %country, "No flatrate offers");
                unresolved
            }
            Lookup::Failed(e) => {
                warn!(title = %title, id = identifier, error = %e, "Availability lookup failed");
                unresolved
            }
        }
    }
}
