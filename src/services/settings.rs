use crate::domain::settings::BrowseConfig;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::ServiceResult;

/// Loosely typed settings as submitted by an administrator.
#[derive(Debug, Clone, Default)]
pub struct BrowseSettingsInput {
    pub products_per_page: i64,
    pub category_limit: i64,
    /// Category slugs, one entry per selected category.
    pub categories: Vec<String>,
    pub show_search: bool,
}

/// Reads the persisted browse settings, falling back to defaults when none
/// were saved yet.
pub fn load_browse_config<R>(repo: &R) -> ServiceResult<BrowseConfig>
where
    R: SettingsReader + ?Sized,
{
    let config = repo
        .get_browse_config()
        .inspect_err(|err| {
            log::error!("Failed to load browse settings: {err}");
        })?
        .unwrap_or_default();

    Ok(config)
}

/// Sanitizes and stores browse settings, returning what was saved.
/// Non-positive numbers fall back to their defaults; blank or malformed
/// slugs are dropped and duplicates collapse.
pub fn save_browse_settings<R>(repo: &R, input: BrowseSettingsInput) -> ServiceResult<BrowseConfig>
where
    R: SettingsWriter + ?Sized,
{
    let config = BrowseConfig::from_raw(
        input.products_per_page,
        input.category_limit,
        input.categories.iter().map(|slug| slug.trim()),
        input.show_search,
    );

    repo.save_browse_config(&config).inspect_err(|err| {
        log::error!("Failed to save browse settings: {err}");
    })?;
    log::info!("Saved browse settings {config:?}");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::types::PageSize;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn missing_settings_use_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_get_browse_config().returning(|| Ok(None));

        let config = load_browse_config(&repo).unwrap();

        assert_eq!(config, BrowseConfig::default());
    }

    #[test]
    fn stored_settings_are_returned() {
        let mut repo = MockRepository::new();
        repo.expect_get_browse_config().returning(|| {
            Ok(Some(BrowseConfig {
                page_size: PageSize::new(6).unwrap(),
                ..BrowseConfig::default()
            }))
        });

        let config = load_browse_config(&repo).unwrap();

        assert_eq!(config.page_size.get(), 6);
    }

    #[test]
    fn saved_settings_are_sanitized() {
        let mut repo = MockRepository::new();
        let expected = BrowseConfig::from_raw(12, 3, ["hats", "shoes"], false);
        repo.expect_save_browse_config()
            .with(eq(expected.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let saved = save_browse_settings(
            &repo,
            BrowseSettingsInput {
                products_per_page: 0,
                category_limit: 3,
                categories: vec![
                    " shoes ".to_string(),
                    "hats".to_string(),
                    "shoes".to_string(),
                    "two words".to_string(),
                    String::new(),
                ],
                show_search: false,
            },
        )
        .unwrap();

        assert_eq!(saved, expected);
        assert_eq!(saved.page_size, PageSize::DEFAULT);
        assert_eq!(saved.allowed_categories.len(), 2);
    }

    #[test]
    fn repository_failure_is_query_failed() {
        let mut repo = MockRepository::new();
        repo.expect_get_browse_config()
            .returning(|| Err(RepositoryError::ConnectionError("down".to_string())));

        assert!(matches!(
            load_browse_config(&repo),
            Err(ServiceError::QueryFailed(_))
        ));
    }
}
