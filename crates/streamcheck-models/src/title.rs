use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A single watchlist entry and the subscription platforms that carry it.
///
/// A `Title` starts out with no platforms and is populated exactly once, when
/// the metadata provider lookup finishes (see [`Title::with_platforms`]).
/// Platform names are unique; the order they were reported in is kept so the
/// platform summary can list them in first-encountered order.
#[derive(Debug, Clone)]
pub struct Title {
    name: String,
    platforms: Vec<String>,
}

impl Title {
    /// Create an unresolved title with no platforms
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platforms: Vec::new(),
        }
    }

    /// Consume an unresolved title and attach the platforms found for it.
    /// Duplicate names are dropped, keeping the first occurrence.
    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        self.platforms = platforms
            .into_iter()
            .map(Into::into)
            .filter(|p| seen.insert(p.clone()))
            .collect();
        self
    }

    /// Display title as scraped from the listing
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Platform names in the order the provider reported them
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn sorted_platforms(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.platforms.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// True when at least one subscription platform carries this title
    pub fn available(&self) -> bool {
        !self.platforms.is_empty()
    }
}

impl PartialEq for Title {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sorted_platforms() == other.sorted_platforms()
    }
}

impl Eq for Title {}

// Platforms sorted, as in the text form
impl Serialize for Title {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Title", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("available", &self.available())?;
        state.serialize_field("platforms", &self.sorted_platforms())?;
        state.end()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available() {
            write!(
                f,
                "Movie: {}\n\nPlatforms \n---------- \n{}",
                self.name,
                self.sorted_platforms().join("\n")
            )
        } else {
            write!(f, "Movie: {}\nNot available on any streaming platform", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_title_is_unavailable() {
        let title = Title::new("Stalker");
        assert!(!title.available());
        assert!(title.platforms().is_empty());
    }

    #[test]
    fn test_available_iff_platforms_present() {
        let titles = vec![
            Title::new("A"),
            Title::new("B").with_platforms(Vec::<String>::new()),
            Title::new("C").with_platforms(["Netflix"]),
            Title::new("D").with_platforms(["Netflix", "MUBI"]),
        ];
        for title in &titles {
            assert_eq!(title.available(), !title.platforms().is_empty());
        }
    }

    #[test]
    fn test_with_platforms_drops_duplicates() {
        let title = Title::new("Heat").with_platforms(["Netflix", "MUBI", "Netflix"]);
        assert_eq!(title.platforms(), &["Netflix".to_string(), "MUBI".to_string()]);
    }

    #[test]
    fn test_equality_ignores_platform_order() {
        let a = Title::new("Heat").with_platforms(["Netflix", "MUBI"]);
        let b = Title::new("Heat").with_platforms(["MUBI", "Netflix"]);
        let c = Title::new("Heat").with_platforms(["MUBI"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_available() {
        let title = Title::new("Heat").with_platforms(["Netflix", "Amazon Prime Video"]);
        assert_eq!(
            title.to_string(),
            "Movie: Heat\n\nPlatforms \n---------- \nAmazon Prime Video\nNetflix"
        );
    }

    #[test]
    fn test_serializes_sorted_platforms() {
        let title = Title::new("Heat").with_platforms(["Netflix", "Max"]);
        assert_eq!(
            serde_json::to_value(&title).unwrap(),
            serde_json::json!({"name": "Heat", "available": true, "platforms": ["Max", "Netflix"]})
        );
    }

    #[test]
    fn test_display_unavailable() {
        let title = Title::new("Stalker");
        assert_eq!(
            title.to_string(),
            "Movie: Stalker\nNot available on any streaming platform"
        );
    }
}
