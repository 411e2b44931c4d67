//! Translation and language preference endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::enums::Language,
    AppState,
};

use super::{ApiJson, AuthenticatedUser};

/// Longest accepted language code (matches the cache columns)
const MAX_LANGUAGE_CODE_LEN: usize = 10;

fn default_language_code() -> String {
    Language::default().code().to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    /// Text to translate; surrounding whitespace is ignored
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language_code")]
    pub source_language: String,
    #[serde(default = "default_language_code")]
    pub target_language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
    pub source_language: String,
    pub target_language: String,
    /// Whether the translation was served from the cache
    pub cached: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPreferenceRequest {
    /// Language code; English when omitted
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreferenceResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub language: Language,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LanguageInfo {
    pub code: Language,
    pub name: String,
}

fn validate_language_code(field: &str, code: &str) -> AppResult<()> {
    if code.is_empty() || code.chars().count() > MAX_LANGUAGE_CODE_LEN {
        return Err(AppError::Validation(format!(
            "{} must be 1 to {} characters",
            field, MAX_LANGUAGE_CODE_LEN
        )));
    }
    Ok(())
}

/// Translate text, using the translation cache when possible
#[utoipa::path(
    post,
    path = "/translate",
    tag = "translations",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated text, or the original when the provider is unavailable", body = TranslateResponse),
        (status = 400, description = "Missing text or malformed body", body = crate::error::ErrorResponse)
    )
)]
pub async fn translate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TranslateRequest>,
) -> AppResult<Json<TranslateResponse>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }

    let max_len = state.config.translation.max_text_length;
    if text.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "Text exceeds the maximum length of {} characters",
            max_len
        )));
    }

    validate_language_code("source_language", &request.source_language)?;
    validate_language_code("target_language", &request.target_language)?;

    let translation = state
        .services
        .translations
        .translate(text, &request.source_language, &request.target_language)
        .await?;

    Ok(Json(TranslateResponse {
        success: true,
        original: text.to_string(),
        translated: translation.text,
        source_language: request.source_language,
        target_language: request.target_language,
        cached: translation.cached,
    }))
}

/// Set the caller's preferred language
#[utoipa::path(
    post,
    path = "/set-preference",
    tag = "translations",
    security(("bearer_auth" = [])),
    request_body = SetPreferenceRequest,
    responses(
        (status = 200, description = "Preference stored", body = PreferenceResponse),
        (status = 400, description = "Invalid language", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_preference(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(request): ApiJson<SetPreferenceRequest>,
) -> AppResult<Json<PreferenceResponse>> {
    let code = request.language.unwrap_or_else(default_language_code);
    let language = state.services.preferences.set(claims.user_id, &code).await?;

    Ok(Json(PreferenceResponse {
        success: true,
        message: Some("Language preference updated".to_string()),
        language,
    }))
}

/// Get the caller's preferred language
#[utoipa::path(
    get,
    path = "/get-preference",
    tag = "translations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Preferred language (defaults to en)", body = PreferenceResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_preference(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<PreferenceResponse>> {
    let language = state.services.preferences.get(claims.user_id).await?;

    Ok(Json(PreferenceResponse {
        success: true,
        message: None,
        language,
    }))
}

/// Languages available as preferences
#[utoipa::path(
    get,
    path = "/languages",
    tag = "translations",
    responses(
        (status = 200, description = "Supported languages", body = Vec<LanguageInfo>)
    )
)]
pub async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        Language::ALL
            .into_iter()
            .map(|code| LanguageInfo {
                code,
                name: code.label().to_string(),
            })
            .collect(),
    )
}
