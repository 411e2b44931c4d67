//! Shared helpers for in-process API tests

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use shelfmark_server::{
    api,
    config::AppConfig,
    models::{enums::Language, user::{Role, UserClaims}},
    repository::Repository,
    services::{
        preferences::{PreferenceService, PreferenceStore},
        provider::{ProviderError, TranslationProvider},
        translations::{StoreOutcome, TranslationCache, TranslationService},
        Services,
    },
    AppResult, AppState,
};

type CacheKey = (String, String, String);

#[derive(Default)]
pub struct MemoryCache {
    pub entries: Mutex<HashMap<CacheKey, String>>,
}

impl MemoryCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationCache for MemoryCache {
    async fn lookup(&self, source: &str, target: &str, text: &str) -> AppResult<Option<String>> {
        let key = (source.to_string(), target.to_string(), text.to_string());
        Ok(self.entries.lock().unwrap().get(&key).cloned())
    }

    async fn store(&self, source: &str, target: &str, text: &str, translated: &str) -> AppResult<StoreOutcome> {
        let key = (source.to_string(), target.to_string(), text.to_string());
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&key) {
            return Ok(StoreOutcome::Duplicate);
        }
        entries.insert(key, translated.to_string());
        Ok(StoreOutcome::Inserted)
    }
}

#[derive(Default)]
pub struct MemoryPreferences {
    pub rows: Mutex<HashMap<i32, Language>>,
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn find(&self, user_id: i32) -> AppResult<Option<Language>> {
        Ok(self.rows.lock().unwrap().get(&user_id).copied())
    }

    async fn upsert(&self, user_id: i32, language: Language) -> AppResult<()> {
        self.rows.lock().unwrap().insert(user_id, language);
        Ok(())
    }
}

/// Provider with a fixed phrasebook; unknown texts fail like an unreachable service
#[derive(Default)]
pub struct StubProvider {
    pub phrases: HashMap<(String, String), String>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn with_phrase(mut self, text: &str, target: &str, translated: &str) -> Self {
        self.phrases
            .insert((text.to_string(), target.to_string()), translated.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for StubProvider {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.phrases
            .get(&(text.to_string(), target.to_string()))
            .cloned()
            .ok_or(ProviderError::Timeout)
    }
}

pub struct TestApp {
    pub router: Router,
    pub config: Arc<AppConfig>,
    pub cache: Arc<MemoryCache>,
    pub preferences: Arc<MemoryPreferences>,
    pub provider: Arc<StubProvider>,
}

impl TestApp {
    /// Build the full router. The database pool is lazy and never used by these tests.
    pub fn new(provider: StubProvider) -> Self {
        let config = AppConfig::default();
        let pool = PgPoolOptions::new()
            .min_connections(0)
            .connect_lazy(&config.database.url)
            .expect("lazy pool");

        let cache = Arc::new(MemoryCache::default());
        let preferences = Arc::new(MemoryPreferences::default());
        let provider = Arc::new(provider);

        let mut services = Services::new(Repository::new(pool), &config).expect("services");
        services.translations = TranslationService::new(cache.clone(), provider.clone());
        services.preferences = PreferenceService::new(preferences.clone());

        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            services: Arc::new(services),
        };

        Self {
            router: api::router(state),
            config,
            cache,
            preferences,
            provider,
        }
    }

    pub fn token_for(&self, user_id: i32, role: Role) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = UserClaims {
            sub: format!("user{}", user_id),
            user_id,
            role,
            exp: now + 3600,
            iat: now,
        };
        claims
            .create_token(&self.config.auth.jwt_secret)
            .expect("token")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }
}

pub fn json_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}
