use crate::platforms::PlatformCounts;
use crate::title::Title;
use serde::Serialize;
use std::fmt;

/// Width of the `*` line printed between titles
pub const SEPARATOR_WIDTH: usize = 50;

/// Aggregate view of a resolved watchlist: the titles in scrape order plus
/// how many of them each platform carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchlistReport {
    titles: Vec<Title>,
    #[serde(rename = "summary")]
    platform_counts: PlatformCounts,
}

impl WatchlistReport {
    pub fn from_titles(titles: Vec<Title>) -> Self {
        let platform_counts = PlatformCounts::from_titles(&titles);
        Self {
            titles,
            platform_counts,
        }
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn platform_counts(&self) -> &PlatformCounts {
        &self.platform_counts
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.titles.iter().filter(|t| t.available()).count()
    }
}

impl fmt::Display for WatchlistReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "*".repeat(SEPARATOR_WIDTH);
        for title in &self.titles {
            writeln!(f, "{}", title)?;
            writeln!(f, "{}", separator)?;
        }

        write!(f, "Platforms summary \n----------\n")?;
        for (platform, count) in self.platform_counts.iter() {
            writeln!(f, "{}: {}", platform, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rendering() {
        let report = WatchlistReport::from_titles(vec![
            Title::new("Heat").with_platforms(["Netflix"]),
            Title::new("Stalker"),
        ]);
        let stars = "*".repeat(50);
        let expected = format!(
            "Movie: Heat\n\nPlatforms \n---------- \nNetflix\n{stars}\n\
             Movie: Stalker\nNot available on any streaming platform\n{stars}\n\
             Platforms summary \n----------\nNetflix: 1\n"
        );
        assert_eq!(report.to_string(), expected);
        assert_eq!(report.available_count(), 1);
    }

    #[test]
    fn test_report_json_shape() {
        let report = WatchlistReport::from_titles(vec![
            Title::new("Heat").with_platforms(["Netflix", "Max"]),
            Title::new("Stalker"),
        ]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["titles"][0]["name"], "Heat");
        assert_eq!(value["titles"][0]["platforms"], serde_json::json!(["Max", "Netflix"]));
        assert_eq!(value["titles"][1]["available"], false);
        assert_eq!(value["titles"][1]["platforms"], serde_json::json!([]));
        assert_eq!(
            value["summary"],
            serde_json::json!([
                {"platform": "Netflix", "titles": 1},
                {"platform": "Max", "titles": 1}
            ])
        );
    }

    #[test]
    fn test_empty_report() {
        let report = WatchlistReport::from_titles(Vec::new());
        assert!(report.is_empty());
        assert!(report.platform_counts().is_empty());
        assert_eq!(report.to_string(), "Platforms summary \n----------\n");
    }
}
