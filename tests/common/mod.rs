#![allow(dead_code)]

use catalog_browse::db::{DbPool, establish_connection_pool};
use catalog_browse::models::category::NewCategory;
use catalog_browse::models::product::{NewProduct, NewProductCategory, PUBLISHED};
use catalog_browse::schema::{categories, product_categories, products};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory for the
/// duration of a test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

/// Product row to seed; `minute` orders products by creation time.
pub struct SeedProduct<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub short_description: &'a str,
    pub status: &'a str,
    pub minute: i64,
    pub categories: &'a [i32],
}

impl<'a> SeedProduct<'a> {
    pub fn new(slug: &'a str, name: &'a str, minute: i64) -> Self {
        Self {
            slug,
            name,
            description: "",
            short_description: "",
            status: PUBLISHED,
            minute,
            categories: &[],
        }
    }

    pub fn in_categories(mut self, categories: &'a [i32]) -> Self {
        self.categories = categories;
        self
    }

    pub fn status(mut self, status: &'a str) -> Self {
        self.status = status;
        self
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    pub fn short_description(mut self, short_description: &'a str) -> Self {
        self.short_description = short_description;
        self
    }
}

fn timestamp(minute: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::minutes(minute)
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 temp path"))
            .expect("create pool");
        pool.get()
            .expect("get connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn add_category(&self, slug: &str, name: &str) -> i32 {
        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(categories::table)
            .values(&NewCategory { slug, name })
            .returning(categories::id)
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn add_product(&self, seed: SeedProduct<'_>) -> i32 {
        let mut conn = self.pool.get().unwrap();
        let created_at = timestamp(seed.minute);
        let id: i32 = diesel::insert_into(products::table)
            .values(&NewProduct {
                slug: seed.slug,
                name: seed.name,
                description: seed.description,
                short_description: seed.short_description,
                status: seed.status,
                price_html: "<span class=\"amount\">$10.00</span>",
                image_url: None,
                created_at,
                updated_at: created_at,
            })
            .returning(products::id)
            .get_result(&mut conn)
            .unwrap();

        let links = seed
            .categories
            .iter()
            .map(|&category_id| NewProductCategory {
                product_id: id,
                category_id,
            })
            .collect::<Vec<_>>();
        if !links.is_empty() {
            diesel::insert_into(product_categories::table)
                .values(&links)
                .execute(&mut conn)
                .unwrap();
        }
        id
    }

    /// Seeds `count` published products named `Product 01`, `Product 02`, ...
    pub fn add_numbered_products(&self, count: usize, categories: &[i32]) {
        for i in 1..=count {
            let slug = format!("product-{i:02}");
            let name = format!("Product {i:02}");
            self.add_product(SeedProduct::new(&slug, &name, i as i64).in_categories(categories));
        }
    }
}
