//! Catalog management service (books and reviews)

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        review::{CreateReview, Review, UpdateReview},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books_search(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.books_create(data).await?;
        tracing::info!("Created book {} '{}'", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.books_update(id, data).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    pub async fn list_reviews(&self, book_id: i32) -> AppResult<Vec<Review>> {
        self.repository.books_get_by_id(book_id).await?;
        self.repository.reviews_for_book(book_id).await
    }

    pub async fn create_review(&self, book_id: i32, user_id: i32, data: &CreateReview) -> AppResult<Review> {
        let data = data.trimmed();
        data.validate()?;
        self.repository.books_get_by_id(book_id).await?;
        self.repository
            .reviews_create(book_id, user_id, &data.comment, data.rating)
            .await
    }

    /// Only the review's author may edit it
    pub async fn update_review(
        &self,
        book_id: i32,
        review_id: i32,
        user_id: i32,
        data: &UpdateReview,
    ) -> AppResult<Review> {
        let data = data.trimmed();
        data.validate()?;
        let review = self.repository.reviews_get(book_id, review_id).await?;
        if review.user_id != user_id {
            return Err(AppError::Authorization("Only the author can edit this review".to_string()));
        }
        self.repository
            .reviews_update(book_id, review_id, &data.comment, data.rating)
            .await
    }

    /// Reviews of other users are reported as not found
    pub async fn delete_review(&self, book_id: i32, review_id: i32, user_id: i32) -> AppResult<()> {
        self.repository.reviews_delete_owned(book_id, review_id, user_id).await
    }
}
