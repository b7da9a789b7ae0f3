use crate::title::Title;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Number of titles carried by each platform.
///
/// Entries keep first-encountered order (title order, then the provider's
/// order within a title). Equality compares the counts only, so two tables
/// built from the same titles in a different order are equal.
#[derive(Debug, Clone, Default)]
pub struct PlatformCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl PlatformCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_titles<'a, I>(titles: I) -> Self
    where
        I: IntoIterator<Item = &'a Title>,
    {
        let mut counts = Self::new();
        for title in titles {
            for platform in title.platforms() {
                counts.record(platform);
            }
        }
        counts
    }

    fn record(&mut self, platform: &str) {
        match self.index.get(platform) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(platform.to_string(), self.entries.len());
                self.entries.push((platform.to_string(), 1));
            }
        }
    }

    /// Count for one platform, zero when no title carries it
    pub fn get(&self, platform: &str) -> usize {
        self.index
            .get(platform)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for PlatformCounts {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, count)| other.get(name) == count)
    }
}

impl Eq for PlatformCounts {}

#[derive(Serialize)]
struct PlatformEntry<'a> {
    platform: &'a str,
    titles: usize,
}

// A list of `{platform, titles}` objects in first-encountered order
impl Serialize for PlatformCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self
            .iter()
            .map(|(platform, titles)| PlatformEntry { platform, titles });
        serializer.collect_seq(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_first_encountered_order() {
        let titles = vec![
            Title::new("A").with_platforms(["Netflix", "MUBI"]),
            Title::new("B"),
            Title::new("C").with_platforms(["Disney Plus", "Netflix"]),
        ];
        let counts = PlatformCounts::from_titles(&titles);

        let entries: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(entries, vec![("Netflix", 2), ("MUBI", 1), ("Disney Plus", 1)]);
        assert_eq!(counts.get("Netflix"), 2);
        assert_eq!(counts.get("HBO Max"), 0);
    }

    #[test]
    fn test_counts_are_order_independent() {
        let mut titles = vec![
            Title::new("A").with_platforms(["Netflix", "MUBI"]),
            Title::new("B").with_platforms(["MUBI"]),
            Title::new("C").with_platforms(["Disney Plus", "Netflix", "MUBI"]),
            Title::new("D"),
        ];
        let forward = PlatformCounts::from_titles(&titles);
        titles.reverse();
        let backward = PlatformCounts::from_titles(&titles);

        assert_eq!(forward, backward);
        assert_eq!(forward.get("MUBI"), 3);
    }

    #[test]
    fn test_serializes_as_ordered_entries() {
        let counts = PlatformCounts::from_titles(&[
            Title::new("A").with_platforms(["MUBI"]),
            Title::new("B").with_platforms(["Netflix", "MUBI"]),
        ]);
        assert_eq!(
            serde_json::to_value(&counts).unwrap(),
            serde_json::json!([
                {"platform": "MUBI", "titles": 2},
                {"platform": "Netflix", "titles": 1}
            ])
        );
    }

    #[test]
    fn test_empty_titles_give_empty_counts() {
        let counts = PlatformCounts::from_titles(&[Title::new("A"), Title::new("B")]);
        assert!(counts.is_empty());
        assert_eq!(counts, PlatformCounts::new());
    }
}
