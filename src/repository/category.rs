use diesel::prelude::*;

use crate::domain::category::Category;
use crate::models::category::Category as DbCategory;
use crate::models::product::PUBLISHED;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryListQuery, CategoryReader, DieselRepository};
use crate::schema::{categories, product_categories, products};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        let mut conn = self.conn()?;

        let non_empty = product_categories::table
            .inner_join(products::table)
            .filter(products::status.eq(PUBLISHED))
            .select(product_categories::category_id);

        let mut items = categories::table
            .filter(categories::id.eq_any(non_empty))
            .order((categories::name.asc(), categories::id.asc()))
            .select(DbCategory::as_select())
            .into_boxed();

        if !query.slugs.is_empty() {
            let slugs: Vec<&str> = query.slugs.iter().map(|slug| slug.as_str()).collect();
            items = items.filter(categories::slug.eq_any(slugs));
        }

        if let Some(limit) = query.limit {
            items = items.limit(i64::from(limit.get()));
        }

        items
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(|category| Category::try_from(category).map_err(RepositoryError::from))
            .collect()
    }
}
