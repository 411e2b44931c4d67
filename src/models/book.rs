//! Book (catalog item) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub summary: String,
    pub publication_year: Option<i32>,
    /// Cover image location
    pub image_url: Option<String>,
    pub available: bool,
}

/// Catalog search parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive match on title, author or genre
    pub search: Option<String>,
    pub available: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    #[serde(default)]
    pub summary: String,
    pub publication_year: Option<i32>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub publication_year: Option<i32>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}
