use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::category::Category;
use crate::domain::filter::Filter;
use crate::domain::product::ProductSummary;
use crate::domain::settings::BrowseConfig;
use crate::domain::types::{CategoryLimit, CategorySlug, PageNumber, PageSize};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: PageNumber,
    pub per_page: PageSize,
}

/// Restrictions shared by the product list and count queries. Only
/// published products are ever considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<CategorySlug>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    pub filter: ProductFilter,
    pub pagination: Option<Pagination>,
}

/// Selects the categories offered as browse tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryListQuery {
    /// Restrict to these slugs; empty means any category.
    pub slugs: Vec<CategorySlug>,
    pub limit: Option<CategoryLimit>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, slug: CategorySlug) -> Self {
        self.category = Some(slug);
        self
    }

    /// Adds a text restriction; blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }
}

impl From<&Filter> for ProductFilter {
    fn from(filter: &Filter) -> Self {
        let mut restrictions = ProductFilter::new();
        if let Some(slug) = filter.category.slug() {
            restrictions = restrictions.category(slug.clone());
        }
        if let Some(term) = filter.search.term() {
            restrictions = restrictions.search(term);
        }
        restrictions
    }
}

impl ProductListQuery {
    pub fn new(filter: ProductFilter) -> Self {
        Self {
            filter,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: PageNumber, per_page: PageSize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slugs(mut self, slugs: impl IntoIterator<Item = CategorySlug>) -> Self {
        self.slugs = slugs.into_iter().collect();
        self
    }

    pub fn limit(mut self, limit: CategoryLimit) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub trait ProductReader {
    /// Returns one bounded, newest-first slice of published products.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<ProductSummary>>;
    /// Counts every published product matching the filter, ignoring pagination.
    fn count_products(&self, filter: ProductFilter) -> RepositoryResult<usize>;
}

pub trait CategoryReader {
    /// Lists categories holding at least one published product, ordered by name.
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
}

pub trait SettingsReader {
    fn get_browse_config(&self) -> RepositoryResult<Option<BrowseConfig>>;
}

pub trait SettingsWriter {
    fn save_browse_config(&self, config: &BrowseConfig) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryKey, SearchText};

    #[test]
    fn product_filter_from_browse_filter() {
        let filter = Filter::new(
            CategoryKey::parse("hoodies").unwrap(),
            SearchText::new(" zip "),
            PageNumber::new(2).unwrap(),
        );
        let restrictions = ProductFilter::from(&filter);
        assert_eq!(restrictions.category.unwrap().as_str(), "hoodies");
        assert_eq!(restrictions.search.as_deref(), Some("zip"));
    }

    #[test]
    fn all_categories_and_blank_search_are_unrestricted() {
        assert_eq!(ProductFilter::from(&Filter::default()), ProductFilter::new());
        assert_eq!(ProductFilter::new().search("   ").search, None);
    }
}
