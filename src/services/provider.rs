//! Outbound translation provider (LibreTranslate-compatible HTTP API)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::TranslationConfig,
    error::{AppError, AppResult},
};

/// Why a provider call produced no translation
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("translation request timed out")]
    Timeout,

    #[error("translation request failed: {0}")]
    Transport(String),

    #[error("translation provider returned status {0}")]
    Status(StatusCode),

    #[error("translation provider response is missing translatedText")]
    MissingText,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Something that can translate text between two language codes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str)
        -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// HTTP client for a LibreTranslate endpoint
#[derive(Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(config: &TranslationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.api_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body: TranslateResponse = response.json().await?;
        body.translated_text.ok_or(ProviderError::MissingText)
    }
}
