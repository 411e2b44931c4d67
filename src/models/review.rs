//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Review with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub username: String,
    pub comment: String,
    /// 0 to 5 stars
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 255, message = "Comment must be 1 to 255 characters"))]
    pub comment: String,
    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    #[serde(default)]
    pub rating: i16,
}

/// Update review request; an omitted rating keeps the previous one
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(length(min = 1, max = 255, message = "Comment must be 1 to 255 characters"))]
    pub comment: String,
    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: Option<i16>,
}

impl CreateReview {
    /// Copy with surrounding whitespace removed from the comment
    pub fn trimmed(&self) -> Self {
        Self {
            comment: self.comment.trim().to_string(),
            rating: self.rating,
        }
    }
}

impl UpdateReview {
    pub fn trimmed(&self) -> Self {
        Self {
            comment: self.comment.trim().to_string(),
            rating: self.rating,
        }
    }
}
