use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::ProductSummary;

/// Status value of products visible on the storefront.
pub const PUBLISHED: &str = "publish";

/// Image shown for products without their own thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.svg";

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for a catalog product row.
pub struct Product {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub status: String,
    pub price_html: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub short_description: &'a str,
    pub status: &'a str,
    pub price_html: &'a str,
    pub image_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct NewProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}

fn thumbnail_markup(image_url: Option<&str>, name: &str) -> String {
    let src = image_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE);
    let markup = format!(
        r#"<img src="{}" alt="{}" width="300" height="300">"#,
        ammonia::clean_text(src),
        ammonia::clean_text(name),
    );
    ammonia::clean(&markup)
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            permalink_url: format!("/product/{}", product.slug),
            thumbnail_markup: thumbnail_markup(product.image_url.as_deref(), &product.name),
            price_markup: ammonia::clean(&product.price_html),
            name: product.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample(image_url: Option<&str>, price_html: &str) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: 1,
            slug: "blue-hoodie".to_string(),
            name: "Blue Hoodie".to_string(),
            description: String::new(),
            short_description: String::new(),
            status: PUBLISHED.to_string(),
            price_html: price_html.to_string(),
            image_url: image_url.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn product_into_summary_builds_permalink_and_thumbnail() {
        let summary: ProductSummary =
            sample(Some("/media/hoodie.png"), "<span>$45.00</span>").into();

        assert_eq!(summary.permalink_url, "/product/blue-hoodie");
        assert_eq!(summary.name, "Blue Hoodie");
        assert!(summary.thumbnail_markup.starts_with("<img"));
        assert!(summary.thumbnail_markup.contains("/media/hoodie.png"));
        assert_eq!(summary.price_markup, "<span>$45.00</span>");
    }

    #[test]
    fn missing_image_uses_placeholder() {
        let summary: ProductSummary = sample(None, "").into();
        assert!(summary.thumbnail_markup.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn price_markup_is_sanitized() {
        let summary: ProductSummary =
            sample(None, "<span>$1</span><script>alert(1)</script>").into();
        assert!(!summary.price_markup.contains("script"));
        assert!(summary.price_markup.contains("$1"));
    }
}
