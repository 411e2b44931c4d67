//! Translation cache persistence on Repository
//!
//! Entries are unique per (source_language, target_language, source_text). The
//! unique index is built on `md5(source_text)` so that long texts stay indexable;
//! lookups compare the full text as well.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, page_bounds, Repository};
use crate::{
    error::AppResult,
    models::translation::{CachedTranslation, CachedTranslationQuery},
    services::translations::{StoreOutcome, TranslationCache},
};

fn push_cache_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a CachedTranslationQuery) {
    builder.push(" WHERE 1=1");

    if let Some(ref source) = query.source_language {
        builder.push(" AND source_language = ").push_bind(source.clone());
    }
    if let Some(ref target) = query.target_language {
        builder.push(" AND target_language = ").push_bind(target.clone());
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = like_pattern(term);
        builder
            .push(" AND (source_text ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR translated_text ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl Repository {
    /// Point lookup on the cache key
    pub async fn translations_lookup(
        &self,
        source_language: &str,
        target_language: &str,
        source_text: &str,
    ) -> AppResult<Option<String>> {
        let translated: Option<String> = sqlx::query_scalar(
            r#"
            SELECT translated_text FROM cached_translations
            WHERE source_language = $1 AND target_language = $2
              AND md5(source_text) = md5($3) AND source_text = $3
            "#,
        )
        .bind(source_language)
        .bind(target_language)
        .bind(source_text)
        .fetch_optional(&self.pool)
        .await?;
        Ok(translated)
    }

    /// Insert a cache entry unless one already exists for the key
    pub async fn translations_insert(
        &self,
        source_language: &str,
        target_language: &str,
        source_text: &str,
        translated_text: &str,
    ) -> AppResult<StoreOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO cached_translations (source_language, target_language, source_text, translated_text)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (source_language, target_language, md5(source_text)) DO NOTHING
            "#,
        )
        .bind(source_language)
        .bind(target_language)
        .bind(source_text)
        .bind(translated_text)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            StoreOutcome::Duplicate
        } else {
            StoreOutcome::Inserted
        })
    }

    /// Admin listing, newest first
    pub async fn translations_list(
        &self,
        query: &CachedTranslationQuery,
    ) -> AppResult<(Vec<CachedTranslation>, i64)> {
        let (_, per_page, offset) = page_bounds(query.page, query.per_page);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cached_translations");
        push_cache_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT id, source_language, target_language, source_text, translated_text, created_at FROM cached_translations",
        );
        push_cache_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = select
            .build_query_as::<CachedTranslation>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }
}

#[async_trait]
impl TranslationCache for Repository {
    async fn lookup(&self, source_language: &str, target_language: &str, text: &str) -> AppResult<Option<String>> {
        self.translations_lookup(source_language, target_language, text).await
    }

    async fn store(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
        translated: &str,
    ) -> AppResult<StoreOutcome> {
        self.translations_insert(source_language, target_language, text, translated).await
    }
}
