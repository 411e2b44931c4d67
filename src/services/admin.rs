//! Read-only admin views over translation data

use crate::{
    error::AppResult,
    models::translation::{
        CachedTranslationQuery, CachedTranslationSummary, LanguagePreference, LanguagePreferenceQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AdminService {
    repository: Repository,
}

impl AdminService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn cached_translations(
        &self,
        query: &CachedTranslationQuery,
    ) -> AppResult<(Vec<CachedTranslationSummary>, i64)> {
        let (rows, total) = self.repository.translations_list(query).await?;
        Ok((rows.into_iter().map(CachedTranslationSummary::from).collect(), total))
    }

    pub async fn language_preferences(
        &self,
        query: &LanguagePreferenceQuery,
    ) -> AppResult<(Vec<LanguagePreference>, i64)> {
        self.repository.preferences_list(query).await
    }
}
