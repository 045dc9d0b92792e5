//! Persisted browse settings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryLimit, CategorySlug, PageSize};

/// Process-wide browse configuration, read once per request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseConfig {
    pub page_size: PageSize,
    pub category_limit: CategoryLimit,
    /// Categories offered as tabs. Empty means every non-empty category.
    pub allowed_categories: BTreeSet<CategorySlug>,
    pub search_enabled: bool,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::DEFAULT,
            category_limit: CategoryLimit::DEFAULT,
            allowed_categories: BTreeSet::new(),
            search_enabled: true,
        }
    }
}

impl BrowseConfig {
    /// Builds a config from loosely typed stored values. Non-positive numbers
    /// fall back to their defaults and unusable slugs are dropped.
    pub fn from_raw<'a, I>(
        page_size: i64,
        category_limit: i64,
        allowed_categories: I,
        search_enabled: bool,
    ) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let page_size = u32::try_from(page_size)
            .ok()
            .and_then(|v| PageSize::new(v).ok())
            .unwrap_or_default();
        let category_limit = u32::try_from(category_limit)
            .ok()
            .and_then(|v| CategoryLimit::new(v).ok())
            .unwrap_or_default();
        let allowed_categories = allowed_categories
            .into_iter()
            .filter_map(|slug| CategorySlug::new(slug).ok())
            .collect();

        Self {
            page_size,
            category_limit,
            allowed_categories,
            search_enabled,
        }
    }
}
