//! Book domain methods on Repository

use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, page_bounds, Repository};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str =
    "id, title, author, genre, summary, publication_year, image_url, available";

/// Append the WHERE clause shared by the search and count queries
fn push_book_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a BookQuery) {
    builder.push(" WHERE 1=1");

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = like_pattern(term);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR author ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR genre ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(available) = query.available {
        builder.push(" AND available = ").push_bind(available);
    }
}

impl Repository {
    /// Search books with pagination, ordered by title
    pub async fn books_search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let (_, per_page, offset) = page_bounds(query.page, query.per_page);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_book_filters(&mut count, query);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
        push_book_filters(&mut select, query);
        select
            .push(" ORDER BY title, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let books = select.build_query_as::<Book>().fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book
    pub async fn books_create(&self, data: &CreateBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, summary, publication_year, image_url, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.genre)
        .bind(&data.summary)
        .bind(data.publication_year)
        .bind(&data.image_url)
        .bind(data.available.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the provided fields of a book
    pub async fn books_update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE books SET id = id");

        macro_rules! set_field {
            ($field:expr, $name:literal) => {
                if let Some(ref val) = $field {
                    builder.push(concat!(", ", $name, " = ")).push_bind(val.clone());
                }
            };
        }

        set_field!(data.title, "title");
        set_field!(data.author, "author");
        set_field!(data.genre, "genre");
        set_field!(data.summary, "summary");
        set_field!(data.publication_year, "publication_year");
        set_field!(data.image_url, "image_url");
        set_field!(data.available, "available");

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", BOOK_COLUMNS));

        builder
            .build_query_as::<Book>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book (reviews and stock rows cascade)
    pub async fn books_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
