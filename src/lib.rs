//! Shelfmark library catalog server
//!
//! REST JSON API for browsing a book catalog, reviewing books, locating
//! branch stock, and translating catalog text on demand through a
//! database-backed translation cache.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
