use diesel::prelude::*;

use crate::domain::settings::BrowseConfig;
use crate::models::settings::{BrowseSettingCategory, BrowseSettings, SETTINGS_ROW_ID};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};
use crate::schema::{browse_setting_categories, browse_settings};

impl SettingsReader for DieselRepository {
    fn get_browse_config(&self) -> RepositoryResult<Option<BrowseConfig>> {
        let mut conn = self.conn()?;

        let Some(row) = browse_settings::table
            .find(SETTINGS_ROW_ID)
            .select(BrowseSettings::as_select())
            .first::<BrowseSettings>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let selected = browse_setting_categories::table
            .select(browse_setting_categories::slug)
            .order(browse_setting_categories::slug.asc())
            .load::<String>(&mut conn)?;

        Ok(Some(row.into_domain(&selected)))
    }
}

impl SettingsWriter for DieselRepository {
    fn save_browse_config(&self, config: &BrowseConfig) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let row = BrowseSettings::from(config);
        let selected = config
            .allowed_categories
            .iter()
            .map(|slug| BrowseSettingCategory {
                slug: slug.as_str(),
            })
            .collect::<Vec<_>>();

        conn.transaction::<(), diesel::result::Error, _>(move |conn| {
            diesel::replace_into(browse_settings::table)
                .values(&row)
                .execute(conn)?;

            diesel::delete(browse_setting_categories::table).execute(conn)?;

            if !selected.is_empty() {
                diesel::insert_into(browse_setting_categories::table)
                    .values(&selected)
                    .execute(conn)?;
            }

            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}
