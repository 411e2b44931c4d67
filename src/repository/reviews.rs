//! Review domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::review::Review,
};

const REVIEW_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.user_id, u.username, r.comment, r.rating, r.created_at
    FROM reviews r
    JOIN users u ON u.id = r.user_id
"#;

impl Repository {
    /// List reviews for a book, newest first
    pub async fn reviews_for_book(&self, book_id: i32) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, Review>(&format!(
            "{} WHERE r.book_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            REVIEW_SELECT
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a review belonging to a book
    pub async fn reviews_get(&self, book_id: i32, review_id: i32) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(&format!(
            "{} WHERE r.id = $1 AND r.book_id = $2",
            REVIEW_SELECT
        ))
        .bind(review_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))
    }

    /// Create a review
    pub async fn reviews_create(
        &self,
        book_id: i32,
        user_id: i32,
        comment: &str,
        rating: i16,
    ) -> AppResult<Review> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO reviews (book_id, user_id, comment, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(comment)
        .bind(rating)
        .fetch_one(&self.pool)
        .await?;

        self.reviews_get(book_id, id).await
    }

    /// Update comment and, when given, rating
    pub async fn reviews_update(
        &self,
        book_id: i32,
        review_id: i32,
        comment: &str,
        rating: Option<i16>,
    ) -> AppResult<Review> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET comment = $1, rating = COALESCE($2, rating)
            WHERE id = $3 AND book_id = $4
            "#,
        )
        .bind(comment)
        .bind(rating)
        .bind(review_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", review_id)));
        }
        self.reviews_get(book_id, review_id).await
    }

    /// Delete a review only if it belongs to the given user
    pub async fn reviews_delete_owned(&self, book_id: i32, review_id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND book_id = $2 AND user_id = $3")
            .bind(review_id)
            .bind(book_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", review_id)));
        }
        Ok(())
    }
}
