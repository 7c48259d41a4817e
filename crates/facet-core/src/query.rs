//! The canonical, URL-addressable search query.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default page when absent or invalid.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when absent or invalid.
pub const DEFAULT_LIMIT: u32 = 20;
/// Upper bound on the page size a query may request.
pub const MAX_LIMIT: u32 = 100;

/// A facet dimension with selectable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetGroup {
    Brands,
    Categories,
}

/// The canonical search query.
///
/// Facet selections are sets: membership, not insertion order, defines
/// equality, and equal selections always encode to the same URL. `page` and
/// `limit` are always `>= 1`; `limit` never exceeds [`MAX_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query. Empty means "match everything".
    pub text: String,
    /// Selected brand option ids.
    pub brand_ids: BTreeSet<String>,
    /// Selected category option ids.
    pub category_ids: BTreeSet<String>,
    /// Current page, 1-indexed.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            brand_ids: BTreeSet::new(),
            category_ids: BTreeSet::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchQuery {
    /// Create the default query (empty text, no selections, page 1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text. A new search invalidates the prior pagination
    /// position, so the page resets to 1.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.page = DEFAULT_PAGE;
        self
    }

    /// Set the page (floored at 1).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(DEFAULT_PAGE);
        self
    }

    /// Set the page size, clamped to `1..=MAX_LIMIT`.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// The selection set for a facet group.
    pub fn selection(&self, group: FacetGroup) -> &BTreeSet<String> {
        match group {
            FacetGroup::Brands => &self.brand_ids,
            FacetGroup::Categories => &self.category_ids,
        }
    }

    /// A copy with `id` toggled in the given group's selection set and the
    /// page reset to 1.
    pub fn toggled(&self, group: FacetGroup, id: &str) -> Self {
        let mut next = self.clone();
        {
            let set = match group {
                FacetGroup::Brands => &mut next.brand_ids,
                FacetGroup::Categories => &mut next.category_ids,
            };
            if !set.remove(id) {
                set.insert(id.to_string());
            }
        }
        next.page = DEFAULT_PAGE;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_adds_then_removes() {
        let query = SearchQuery::new().with_page(4);

        let selected = query.toggled(FacetGroup::Brands, "b1");
        assert!(selected.brand_ids.contains("b1"));
        assert_eq!(selected.page, 1);

        let cleared = selected.toggled(FacetGroup::Brands, "b1");
        assert!(cleared.brand_ids.is_empty());
    }

    #[test]
    fn test_toggled_groups_are_independent() {
        let query = SearchQuery::new()
            .toggled(FacetGroup::Brands, "b1")
            .toggled(FacetGroup::Categories, "c1");

        assert_eq!(query.selection(FacetGroup::Brands).len(), 1);
        assert_eq!(query.selection(FacetGroup::Categories).len(), 1);
        assert!(!query.brand_ids.contains("c1"));
    }

    #[test]
    fn test_with_text_resets_page() {
        let query = SearchQuery::new().with_page(7).with_text("boots");
        assert_eq!(query.page, 1);
        assert_eq!(query.text, "boots");
    }

    #[test]
    fn test_with_limit_clamps() {
        assert_eq!(SearchQuery::new().with_limit(0).limit, 1);
        assert_eq!(SearchQuery::new().with_limit(500).limit, MAX_LIMIT);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = SearchQuery::new();
        a.brand_ids.insert("2".to_string());
        a.brand_ids.insert("10".to_string());

        let mut b = SearchQuery::new();
        b.brand_ids.insert("10".to_string());
        b.brand_ids.insert("2".to_string());

        assert_eq!(a, b);
    }
}
