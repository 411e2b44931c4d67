//! Cached translation and language preference models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::Language;

/// Number of characters shown in admin previews of source texts
pub const PREVIEW_CHARS: usize = 50;

/// A previously retrieved translation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CachedTranslation {
    pub id: i32,
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub translated_text: String,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row for cached translations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CachedTranslationSummary {
    pub id: i32,
    pub source_language: String,
    pub target_language: String,
    pub source_text_preview: String,
    pub translated_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CachedTranslation> for CachedTranslationSummary {
    fn from(entry: CachedTranslation) -> Self {
        CachedTranslationSummary {
            id: entry.id,
            source_text_preview: preview(&entry.source_text),
            source_language: entry.source_language,
            target_language: entry.target_language,
            translated_text: entry.translated_text,
            created_at: entry.created_at,
        }
    }
}

/// First `PREVIEW_CHARS` characters, with "..." appended when the text is longer
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Admin filter for cached translations
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CachedTranslationQuery {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    /// Substring match on source or translated text
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// A user's stored language preference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LanguagePreference {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin filter for language preferences
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LanguagePreferenceQuery {
    pub language: Option<Language>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
