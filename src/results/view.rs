//! Derived views over a result set: ordering and pagination
//!
//! Nothing here mutates the stored results. Views are recomputed on read.

use super::types::ResultItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Number of results shown per page
pub const PAGE_SIZE: usize = 10;

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Order returned by the backend
    #[default]
    Relevance,
    /// Highest social score first
    SocialImpact,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::SocialImpact => "social_impact",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "relevance" => Ok(Self::Relevance),
            "social_impact" | "social" => Ok(Self::SocialImpact),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

/// Order results for display.
///
/// `SocialImpact` is a stable descending sort on `social_score`, with
/// missing scores treated as zero.
pub fn sort_results(results: &[ResultItem], mode: SortMode) -> Vec<&ResultItem> {
    let mut ordered: Vec<&ResultItem> = results.iter().collect();
    if mode == SortMode::SocialImpact {
        ordered.sort_by(|a, b| b.sort_score().total_cmp(&a.sort_score()));
    }
    ordered
}

/// Page position over a result set of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based page index
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(current_page: usize, total_items: usize) -> Self {
        Self {
            current_page,
            page_size: PAGE_SIZE,
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Whether `page` is a valid navigation target
    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Index range of the current page, clipped to the result count
    pub fn range(&self) -> Range<usize> {
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Slice the current page out of an ordered view
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scored(id: u32, score: serde_json::Value) -> ResultItem {
        serde_json::from_value(json!({"id": id, "social_score": score})).unwrap()
    }

    fn ids(items: &[&ResultItem]) -> Vec<u64> {
        items
            .iter()
            .map(|i| i.get("id").and_then(|v| v.as_u64()).unwrap())
            .collect()
    }

    #[test]
    fn test_relevance_keeps_order() {
        let results = vec![scored(1, json!(5)), scored(2, json!(90)), scored(3, json!(null))];
        assert_eq!(ids(&sort_results(&results, SortMode::Relevance)), vec![1, 2, 3]);
    }

    #[test]
    fn test_social_impact_is_stable() {
        let results = vec![scored(1, json!(null)), scored(2, json!(50)), scored(3, json!(0))];
        let sorted = sort_results(&results, SortMode::SocialImpact);

        assert_eq!(ids(&sorted), vec![2, 1, 3]);
        // Underlying order untouched
        assert_eq!(results[0].get("id"), Some(&json!(1)));
    }

    #[test]
    fn test_social_impact_missing_field() {
        let results = vec![
            serde_json::from_value(json!({"id": 1})).unwrap(),
            scored(2, json!(-3)),
            scored(3, json!(0.5)),
        ];
        assert_eq!(ids(&sort_results(&results, SortMode::SocialImpact)), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("relevance".parse::<SortMode>(), Ok(SortMode::Relevance));
        assert_eq!("social-impact".parse::<SortMode>(), Ok(SortMode::SocialImpact));
        assert_eq!("Social_Impact".parse::<SortMode>(), Ok(SortMode::SocialImpact));
        assert!("date".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(1, 0).total_pages(), 0);
        assert_eq!(Pagination::new(1, 1).total_pages(), 1);
        assert_eq!(Pagination::new(1, 10).total_pages(), 1);
        assert_eq!(Pagination::new(1, 11).total_pages(), 2);
        assert_eq!(Pagination::new(1, 95).total_pages(), 10);
    }

    #[test]
    fn test_page_ranges() {
        for n in [0usize, 1, 9, 10, 11, 25, 100] {
            let pages = Pagination::new(1, n).total_pages();
            for p in 1..=pages {
                let pagination = Pagination::new(p, n);
                assert_eq!(pagination.range(), (p - 1) * 10..(p * 10).min(n));
            }
        }

        let items: Vec<u32> = (0..25).collect();
        assert_eq!(Pagination::new(3, 25).page(&items), &[20, 21, 22, 23, 24]);
        assert!(Pagination::new(1, 0).page(&Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn test_navigation_bounds() {
        let last = Pagination::new(3, 25);
        assert!(!last.has_next());
        assert!(last.has_prev());
        assert!(last.contains(1));
        assert!(!last.contains(0));
        assert!(!last.contains(4));

        let empty = Pagination::new(1, 0);
        assert!(!empty.has_next());
        assert!(!empty.has_prev());
        assert!(!empty.contains(1));
    }
}
