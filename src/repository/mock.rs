//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::category::Category;
use crate::domain::product::ProductSummary;
use crate::domain::settings::BrowseConfig;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryListQuery, CategoryReader, ProductFilter, ProductListQuery, ProductReader,
    SettingsReader, SettingsWriter,
};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<ProductSummary>>;
        fn count_products(&self, filter: ProductFilter) -> RepositoryResult<usize>;
    }

    impl CategoryReader for Repository {
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    }

    impl SettingsReader for Repository {
        fn get_browse_config(&self) -> RepositoryResult<Option<BrowseConfig>>;
    }

    impl SettingsWriter for Repository {
        fn save_browse_config(&self, config: &BrowseConfig) -> RepositoryResult<()>;
    }
}
