//! Language preference persistence on Repository

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{page_bounds, Repository};
use crate::{
    error::AppResult,
    models::{
        enums::Language,
        translation::{LanguagePreference, LanguagePreferenceQuery},
    },
    services::preferences::PreferenceStore,
};

fn push_preference_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a LanguagePreferenceQuery) {
    builder.push(" WHERE 1=1");
    if let Some(language) = query.language {
        builder.push(" AND p.preferred_language = ").push_bind(language);
    }
}

impl Repository {
    /// Stored preference for a user, if any
    pub async fn preferences_find(&self, user_id: i32) -> AppResult<Option<Language>> {
        let language: Option<Language> = sqlx::query_scalar(
            "SELECT preferred_language FROM language_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(language)
    }

    /// Create the preference row or update it in place
    pub async fn preferences_upsert(&self, user_id: i32, language: Language) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO language_preferences (user_id, preferred_language)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
                SET preferred_language = EXCLUDED.preferred_language,
                    updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(language)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Admin listing, most recently updated first
    pub async fn preferences_list(
        &self,
        query: &LanguagePreferenceQuery,
    ) -> AppResult<(Vec<LanguagePreference>, i64)> {
        let (_, per_page, offset) = page_bounds(query.page, query.per_page);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM language_preferences p");
        push_preference_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.id, p.user_id, u.username, p.preferred_language, p.created_at, p.updated_at
            FROM language_preferences p
            JOIN users u ON u.id = p.user_id
            "#,
        );
        push_preference_filters(&mut select, query);
        select
            .push(" ORDER BY p.updated_at DESC, p.id DESC LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = select
            .build_query_as::<LanguagePreference>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }
}

#[async_trait]
impl PreferenceStore for Repository {
    async fn find(&self, user_id: i32) -> AppResult<Option<Language>> {
        self.preferences_find(user_id).await
    }

    async fn upsert(&self, user_id: i32, language: Language) -> AppResult<()> {
        self.preferences_upsert(user_id, language).await
    }
}
