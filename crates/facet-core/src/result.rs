//! Canonical search result types.

use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_LIMIT;

/// A product's brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

/// A product category in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// A single product in a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    pub categories: Vec<Category>,
}

/// A selectable facet option with its result count.
///
/// Identity is `id`; two options with the same `id` refer to the same
/// selection regardless of label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
    pub count: u64,
}

/// Facet groups returned alongside a result page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub brands: Vec<FacetOption>,
    pub categories: Vec<FacetOption>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Items for the current page, at most `limit` of them.
    pub items: Vec<Product>,
    /// Facet options with counts.
    pub facets: Facets,
    /// Total matching items across all pages.
    pub total: u64,
    /// Page size echoed by the service; authoritative for page-count math.
    pub limit: u32,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            facets: Facets::default(),
            total: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchResult {
    /// Highest valid page for this result set, never below 1.
    pub fn max_page(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        let limit = u64::from(self.limit.max(1));
        let pages = self.total.div_ceil(limit).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(total: u64, limit: u32) -> SearchResult {
        SearchResult {
            total,
            limit,
            ..SearchResult::default()
        }
    }

    #[test]
    fn test_max_page_rounds_up() {
        assert_eq!(result_with(45, 10).max_page(), 5);
        assert_eq!(result_with(41, 10).max_page(), 5);
        assert_eq!(result_with(40, 10).max_page(), 4);
    }

    #[test]
    fn test_max_page_is_at_least_one() {
        assert_eq!(result_with(0, 20).max_page(), 1);
        assert_eq!(result_with(12, 20).max_page(), 1);
    }

    #[test]
    fn test_max_page_tolerates_zero_limit() {
        assert_eq!(result_with(10, 0).max_page(), 10);
    }
}
