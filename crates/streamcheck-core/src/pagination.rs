use streamcheck_sources::ListingPage;

/// Pages needed for `entry_count` entries at `page_size` per page.
///
/// Mirrors the listing's own arithmetic, which always counts one page past
/// the last full one (28 entries -> 2 pages).
pub fn page_count(entry_count: usize, page_size: usize) -> usize {
    (entry_count / page_size.max(1)).saturating_add(1)
}

/// Page count for a listing, preferring its explicit pagination controls
pub fn listing_page_count(
    first_page: &ListingPage,
    entry_count: usize,
    page_size: usize,
) -> usize {
    first_page
        .last_page
        .filter(|&last| last >= 1)
        .unwrap_or_else(|| page_count(entry_count, page_size))
}
