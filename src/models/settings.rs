use diesel::prelude::*;

use crate::domain::settings::BrowseConfig;

/// Primary key of the single settings row.
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::browse_settings)]
/// Diesel model for the persisted [`BrowseConfig`] scalars.
pub struct BrowseSettings {
    pub id: i32,
    pub products_per_page: i32,
    pub category_limit: i32,
    pub show_search: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::browse_setting_categories)]
pub struct BrowseSettingCategory<'a> {
    pub slug: &'a str,
}

impl BrowseSettings {
    /// Combines the settings row with the stored category selection.
    pub fn into_domain(self, selected: &[String]) -> BrowseConfig {
        BrowseConfig::from_raw(
            i64::from(self.products_per_page),
            i64::from(self.category_limit),
            selected.iter().map(String::as_str),
            self.show_search,
        )
    }
}

impl From<&BrowseConfig> for BrowseSettings {
    fn from(config: &BrowseConfig) -> Self {
        Self {
            id: SETTINGS_ROW_ID,
            products_per_page: i32::try_from(config.page_size.get()).unwrap_or(i32::MAX),
            category_limit: i32::try_from(config.category_limit.get()).unwrap_or(i32::MAX),
            show_search: config.search_enabled,
        }
    }
}
