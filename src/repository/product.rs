//! Product queries backing the catalog browse service.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::product::ProductSummary;
use crate::models::product::{PUBLISHED, Product as DbProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductFilter, ProductListQuery, ProductReader};
use crate::schema::{categories, product_categories, products};

/// Escapes LIKE wildcards and wraps the term for a substring match.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Applies the published/category/search restrictions to a boxed query so
/// that listing and counting always agree on the filtered set.
fn restricted<'a>(filter: &'a ProductFilter) -> products::BoxedQuery<'a, Sqlite> {
    let mut query = products::table
        .filter(products::status.eq(PUBLISHED))
        .into_boxed();

    if let Some(slug) = &filter.category {
        let in_category = product_categories::table
            .inner_join(categories::table)
            .filter(categories::slug.eq(slug.as_str()))
            .select(product_categories::product_id);
        query = query.filter(products::id.eq_any(in_category));
    }

    // Every word must appear in at least one of the text columns.
    for word in filter.search.iter().flat_map(|term| term.split_whitespace()) {
        let pattern = like_pattern(word);
        query = query.filter(
            products::name
                .like(pattern.clone())
                .escape('\\')
                .or(products::description.like(pattern.clone()).escape('\\'))
                .or(products::short_description.like(pattern).escape('\\')),
        );
    }

    query
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<ProductSummary>> {
        let mut conn = self.conn()?;

        let mut items = restricted(&query.filter)
            .order((products::created_at.desc(), products::id.desc()))
            .select(DbProduct::as_select());

        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.page.offset(pagination.per_page))
                .map_err(|_| RepositoryError::ValidationError("page offset overflow".into()))?;
            items = items
                .limit(i64::from(pagination.per_page.get()))
                .offset(offset);
        }

        let rows = items.load::<DbProduct>(&mut conn)?;

        Ok(rows.into_iter().map(ProductSummary::from).collect())
    }

    fn count_products(&self, filter: ProductFilter) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total: i64 = restricted(&filter).count().get_result(&mut conn)?;

        usize::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative product count {total}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("hoodie"), "%hoodie%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
