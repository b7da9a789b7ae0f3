use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, CountryProviders>,
}

#[derive(Debug, Deserialize)]
pub struct CountryProviders {
    #[serde(default)]
    pub flatrate: Option<Vec<ProviderEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderEntry {
    pub provider_name: String,
}

pub fn search_path(title: &str) -> String {
    format!(
        "search/movie?query={}&include_adult=true",
        urlencoding::encode(title)
    )
}

pub fn watch_providers_path(identifier: u64) -> String {
    format!("movie/{}/watch/providers", identifier)
}

/// Identifier of the first search hit; the list is not disambiguated
pub fn first_identifier(response: &SearchResponse) -> Option<u64> {
    response.results.first().and_then(|result| result.id)
}

/// Flatrate provider names for `country`, `None` when the country or the
/// flatrate list is missing or empty
pub fn flatrate_providers(response: &WatchProvidersResponse, country: &str) -> Option<Vec<String>> {
    let names: Vec<String> = response
        .results
        .get(country)?
        .flatrate
        .as_ref()?
        .iter()
        .map(|entry| entry.provider_name.clone())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
