use crate::error::SourceError;
use scraper::{Html, Selector};
use tracing::{debug, warn};


const HEADING_SELECTOR: &str = "h1.section-heading";
const POSTER_SELECTOR: &str = "li.poster-container";
const POSTER_IMAGE_SELECTOR: &str = "img";
const PAGINATION_SELECTOR: &str = ".paginate-pages li";

/// Everything the pipeline needs from one watchlist page.
///
/// Parsing happens eagerly so the (non-`Send`) DOM never outlives this call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Text of the count heading, e.g. "wombatbat WANTS TO SEE 30 FILMS"
    pub heading: Option<String>,
    /// Poster titles in page order
    pub titles: Vec<String>,
    /// Poster containers without a usable image alt text
    pub skipped_posters: usize,
    /// Highest page number in the pagination controls, when present
    pub last_page: Option<usize>,
}

impl ListingPage {
    pub fn parse(html: &str) -> Result<Self, SourceError> {
        let document = Html::parse_document(html);
        let heading_selector = selector(HEADING_SELECTOR)?;
        let poster_selector = selector(POSTER_SELECTOR)?;
        let image_selector = selector(POSTER_IMAGE_SELECTOR)?;
        let pagination_selector = selector(PAGINATION_SELECTOR)?;

        let heading = document
            .select(&heading_selector)
            .next()
            .map(|h1| normalize_whitespace(&h1.text().collect::<String>()));

        let mut titles = Vec::new();
        let mut skipped_posters = 0;
        for (position, poster) in document.select(&poster_selector).enumerate() {
            // The listing is not hydrated when fetched, so the image alt text
            // is the only place the title reliably appears.
            let title = poster
                .select(&image_selector)
                .next()
                .and_then(|img| img.value().attr("alt"))
                .map(str::trim)
                .filter(|alt| !alt.is_empty());

            match title {
                Some(title) => titles.push(title.to_string()),
                None => {
                    warn!(position = position, "Poster without image alt text, skipping");
                    skipped_posters += 1;
                }
            }
        }

        let last_page = document
            .select(&pagination_selector)
            .filter_map(|li| li.text().collect::<String>().trim().parse::<usize>().ok())
            .max();

        debug!(
            heading = ?heading,
            posters = titles.len(),
            skipped = skipped_posters,
            last_page = ?last_page,
            "Parsed watchlist page"
        );

        Ok(Self {
            heading,
            titles,
            skipped_posters,
            last_page,
        })
    }

    /// Total watchlist size announced by the count heading
    pub fn entry_count(&self) -> Option<usize> {
        self.heading.as_deref().and_then(parse_entry_count)
    }
}

/// Extract N from "<user> WANTS TO SEE <N> FILMS" (second-to-last token).
/// Thousands separators are tolerated.
pub fn parse_entry_count(heading: &str) -> Option<usize> {
    let tokens: Vec<&str> = heading.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    tokens[tokens.len() - 2].replace(',', "").parse().ok()
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::Parse(format!("invalid selector '{}': {}", css, e)))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
