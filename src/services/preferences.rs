//! Per-user preferred language

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::AppResult, models::enums::Language};

/// Storage for one preference per user
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn find(&self, user_id: i32) -> AppResult<Option<Language>>;

    /// Create the preference or update it in place
    async fn upsert(&self, user_id: i32, language: Language) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Preferred language of a user; English when none was ever set
    pub async fn get(&self, user_id: i32) -> AppResult<Language> {
        Ok(self.store.find(user_id).await?.unwrap_or_default())
    }

    /// Validate `code` and store it as the user's preference
    pub async fn set(&self, user_id: i32, code: &str) -> AppResult<Language> {
        let language: Language = code.parse()?;
        self.store.upsert(user_id, language).await?;
        tracing::info!("User {} preferred language set to {}", user_id, language);
        Ok(language)
    }
}
