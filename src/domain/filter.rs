//! The browse filter: which category, which search text, which page.

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryKey, PageNumber, SearchText};

/// Immutable `(category, search text, page)` tuple describing one browse
/// request.
///
/// Transitions never mutate a filter in place; each produces a fresh value so
/// that a category or search change can never leave a stale page behind.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Filter {
    pub category: CategoryKey,
    pub search: SearchText,
    pub page: PageNumber,
}

impl Filter {
    pub fn new(category: CategoryKey, search: SearchText, page: PageNumber) -> Self {
        Self {
            category,
            search,
            page,
        }
    }

    /// Switches category, keeping the search text and resetting to page one.
    #[must_use]
    pub fn with_category(&self, category: CategoryKey) -> Self {
        Self::new(category, self.search.clone(), PageNumber::FIRST)
    }

    /// Replaces the search text, keeping the category and resetting to page one.
    #[must_use]
    pub fn with_search(&self, search: SearchText) -> Self {
        Self::new(self.category.clone(), search, PageNumber::FIRST)
    }

    /// Moves to another page of the same result set.
    #[must_use]
    pub fn with_page(&self, page: PageNumber) -> Self {
        Self::new(self.category.clone(), self.search.clone(), page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CategorySlug;

    fn on_page(page: u32) -> Filter {
        Filter::new(
            CategoryKey::Slug(CategorySlug::new("shoes").unwrap()),
            SearchText::new("red"),
            PageNumber::new(page).unwrap(),
        )
    }

    #[test]
    fn category_change_resets_page() {
        for page in [1, 2, 9] {
            let next = on_page(page).with_category(CategoryKey::All);
            assert_eq!(next.page, PageNumber::FIRST);
            assert_eq!(next.search.as_str(), "red");
            assert_eq!(next.category, CategoryKey::All);
        }
    }

    #[test]
    fn search_change_resets_page() {
        let next = on_page(4).with_search(SearchText::new("blue"));
        assert_eq!(next.page, PageNumber::FIRST);
        assert_eq!(next.search.as_str(), "blue");
        assert_eq!(next.category.as_str(), "shoes");
    }

    #[test]
    fn page_change_keeps_category_and_search() {
        let next = on_page(1).with_page(PageNumber::new(3).unwrap());
        assert_eq!(next.page.get(), 3);
        assert_eq!(next.search.as_str(), "red");
        assert_eq!(next.category.as_str(), "shoes");
    }

    #[test]
    fn default_filter_is_first_page_of_everything() {
        let filter = Filter::default();
        assert_eq!(filter.category, CategoryKey::All);
        assert!(filter.search.is_empty());
        assert_eq!(filter.page, PageNumber::FIRST);
    }
}
