//! Cached text translation
//!
//! Lookups go to the translation cache first; on a miss the provider is called and
//! a successful result is cached. Provider failures never reach the caller: the
//! original text is returned unchanged and nothing is cached, so a later request
//! can succeed once the provider recovers. Entries never expire.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::TranslationProvider;
use crate::error::AppResult;

/// Result of a cache insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    /// An entry for the key already existed; the stored value was kept
    Duplicate,
}

/// Persistent mapping (source language, target language, source text) -> translation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationCache: Send + Sync {
    async fn lookup(&self, source_language: &str, target_language: &str, text: &str) -> AppResult<Option<String>>;

    /// Must keep at most one entry per key when called concurrently
    async fn store(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
        translated: &str,
    ) -> AppResult<StoreOutcome>;
}

/// Outcome of a translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Served from the cache without calling the provider
    pub cached: bool,
    /// The provider failed and the original text was returned
    pub fallback: bool,
}

#[derive(Clone)]
pub struct TranslationService {
    cache: Arc<dyn TranslationCache>,
    provider: Arc<dyn TranslationProvider>,
}

impl TranslationService {
    pub fn new(cache: Arc<dyn TranslationCache>, provider: Arc<dyn TranslationProvider>) -> Self {
        Self { cache, provider }
    }

    /// Translate `text`, consulting and populating the cache
    pub async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> AppResult<Translation> {
        if source_language == target_language {
            return Ok(Translation {
                text: text.to_string(),
                cached: false,
                fallback: false,
            });
        }

        if let Some(hit) = self.cache.lookup(source_language, target_language, text).await? {
            tracing::debug!("Translation cache hit ({} -> {})", source_language, target_language);
            return Ok(Translation {
                text: hit,
                cached: true,
                fallback: false,
            });
        }

        let translated = match self.provider.translate(text, source_language, target_language).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(
                    "Translation {} -> {} unavailable, returning original text: {}",
                    source_language,
                    target_language,
                    e
                );
                return Ok(Translation {
                    text: text.to_string(),
                    cached: false,
                    fallback: true,
                });
            }
        };

        let stored = match self.cache.store(source_language, target_language, text, &translated).await {
            Ok(StoreOutcome::Inserted) => translated,
            Ok(StoreOutcome::Duplicate) => {
                // A concurrent request cached this key first; its value wins.
                tracing::debug!("Translation already cached by a concurrent request");
                self.cache
                    .lookup(source_language, target_language, text)
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or(translated)
            }
            Err(e) => {
                tracing::warn!("Failed to cache translation: {}", e);
                translated
            }
        };

        Ok(Translation {
            text: stored,
            cached: false,
            fallback: false,
        })
    }
}
