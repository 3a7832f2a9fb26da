//! Report payload returned by the summary engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Message counts for the three nested time windows.
///
/// Window totals regardless of classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCounts {
    /// Messages received on the reference day.
    pub today: u32,
    /// Messages received since the start of the month.
    pub month: u32,
    /// Messages received since the start of the year.
    pub year: u32,
}

/// Per-category tallies for the messages in the day window.
///
/// Always sums to [`WindowCounts::today`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Messages classified as important.
    pub important: u32,
    /// Messages classified as newsletters.
    pub newsletter: u32,
    /// Everything else.
    pub other: u32,
}

impl CategoryCounts {
    /// Increments the tally for one classified message.
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Important => self.important += 1,
            Category::Newsletter => self.newsletter += 1,
            Category::Other => self.other += 1,
        }
    }

    /// Total messages tallied across all categories.
    pub fn total(&self) -> u32 {
        self.important + self.newsletter + self.other
    }
}

/// The complete counts-and-categories payload for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityReport {
    /// Window totals.
    pub counts: WindowCounts,
    /// Day-window classification tallies.
    pub categories: CategoryCounts,
    /// When this report was assembled.
    pub generated_at: DateTime<Utc>,
}

impl ActivityReport {
    /// Assembles the final payload from the computed counts and tallies.
    ///
    /// Pure assembly; derived statistics are left to the caller.
    pub fn build(counts: WindowCounts, categories: CategoryCounts) -> Self {
        Self {
            counts,
            categories,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_increments_one_category() {
        let mut categories = CategoryCounts::default();
        categories.record(Category::Important);
        categories.record(Category::Newsletter);
        categories.record(Category::Newsletter);
        categories.record(Category::Other);

        assert_eq!(categories.important, 1);
        assert_eq!(categories.newsletter, 2);
        assert_eq!(categories.other, 1);
        assert_eq!(categories.total(), 4);
    }

    #[test]
    fn empty_categories_total_zero() {
        assert_eq!(CategoryCounts::default().total(), 0);
    }

    #[test]
    fn report_serialization() {
        let report = ActivityReport::build(
            WindowCounts {
                today: 3,
                month: 40,
                year: 500,
            },
            CategoryCounts {
                important: 1,
                newsletter: 1,
                other: 1,
            },
        );

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"today\":3"));
        assert!(json.contains("\"month\":40"));
        assert!(json.contains("\"year\":500"));
        assert!(json.contains("\"newsletter\":1"));

        let deserialized: ActivityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.counts, report.counts);
        assert_eq!(deserialized.categories, report.categories);
    }
}
