//! Business logic services

pub mod admin;
pub mod auth;
pub mod branches;
pub mod catalog;
pub mod preferences;
pub mod provider;
pub mod translations;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub branches: branches::BranchesService,
    pub translations: translations::TranslationService,
    pub preferences: preferences::PreferenceService,
    pub admin: admin::AdminService,
}

impl Services {
    /// Create all services backed by the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let provider = provider::LibreTranslateClient::new(&config.translation)?;
        let store = Arc::new(repository.clone());

        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            branches: branches::BranchesService::new(repository.clone()),
            translations: translations::TranslationService::new(store.clone(), Arc::new(provider)),
            preferences: preferences::PreferenceService::new(store),
            admin: admin::AdminService::new(repository.clone()),
            repository,
        })
    }
}
