//! Lenient form accepted by the browse endpoint.
//!
//! Every field is taken as raw text so that cosmetic problems (a missing or
//! negative page, a blank category) are coerced instead of rejected by the
//! extractor.

use serde::Deserialize;

use crate::domain::filter::Filter;
use crate::domain::types::{CategoryKey, PageNumber, PageSize, SearchText};
use crate::dto::browse::LOAD_PRODUCTS_ACTION;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
pub struct BrowseForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub page: String,
    #[serde(default, rename = "pageSize")]
    pub page_size: String,
}

/// Sanitized browse request extracted from a [`BrowseForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseInput {
    pub token: String,
    pub filter: Filter,
    /// Page size requested by the client; `None` when absent or unusable.
    pub page_size: Option<PageSize>,
}

impl TryFrom<BrowseForm> for BrowseInput {
    type Error = FormError;

    fn try_from(form: BrowseForm) -> Result<Self, Self::Error> {
        if form.action.trim() != LOAD_PRODUCTS_ACTION {
            return Err(FormError::UnknownAction(form.action));
        }

        // Unusable category input degrades to every category.
        let category = CategoryKey::parse(&form.category).unwrap_or_default();
        let search = SearchText::new(&form.search);
        let page = form
            .page
            .trim()
            .parse::<i64>()
            .map(PageNumber::coerce)
            .unwrap_or(PageNumber::FIRST);
        let page_size = form
            .page_size
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|size| PageSize::new(size).ok())
            .map(|size| size.min(PageSize::MAX));

        Ok(Self {
            token: form.token.trim().to_string(),
            filter: Filter::new(category, search, page),
            page_size,
        })
    }
}
