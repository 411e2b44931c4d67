//! Book (catalog) and review endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery},
        enums::Language,
        review::{CreateReview, Review, UpdateReview},
    },
    services::translations::TranslationService,
    AppState,
};

use super::{ApiJson, AuthenticatedUser, PaginatedResponse};

/// Language catalog records are written in
const CATALOG_LANGUAGE: Language = Language::En;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookDetailsQuery {
    /// Translate the book fields into this language
    pub lang: Option<String>,
}

/// Book fields rendered in the requested language
#[derive(Debug, Serialize, ToSchema)]
pub struct TranslatedBook {
    pub title: String,
    pub summary: String,
    pub author: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub current_language: Language,
    pub translated: TranslatedBook,
    pub reviews: Vec<Review>,
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<Book>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let (books, total) = state.services.catalog.search_books(&query).await?;
    Ok(Json(PaginatedResponse::new(books, total, query.page, query.per_page)))
}

async fn translate_optional(
    translations: &TranslationService,
    value: Option<&str>,
    target: Language,
) -> AppResult<Option<String>> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(Some(
            translations
                .translate(v, CATALOG_LANGUAGE.code(), target.code())
                .await?
                .text,
        )),
        None => Ok(value.map(str::to_string)),
    }
}

/// Render the descriptive fields of a book in `target`, translating them concurrently
async fn translate_book(
    translations: &TranslationService,
    book: &Book,
    target: Language,
) -> AppResult<TranslatedBook> {
    let (title, summary, author, genre) = tokio::join!(
        translations.translate(&book.title, CATALOG_LANGUAGE.code(), target.code()),
        translate_optional(translations, Some(&book.summary), target),
        translate_optional(translations, book.author.as_deref(), target),
        translate_optional(translations, book.genre.as_deref(), target),
    );

    Ok(TranslatedBook {
        title: title?.text,
        summary: summary?.unwrap_or_default(),
        author: author?,
        genre: genre?,
    })
}

/// Get book details, reviews and a translation of the descriptive fields
///
/// The language is taken from `lang`, then from the caller's stored preference,
/// and defaults to English.
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID"),
        BookDetailsQuery
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 400, description = "Unsupported language", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    Path(id): Path<i32>,
    Query(params): Query<BookDetailsQuery>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    let reviews = state.services.catalog.list_reviews(id).await?;

    let language = match (params.lang, user) {
        (Some(code), _) => code.parse::<Language>()?,
        (None, Some(AuthenticatedUser(claims))) => state.services.preferences.get(claims.user_id).await?,
        (None, None) => Language::default(),
    };

    let translated = translate_book(&state.services.translations, &book, language).await?;

    Ok(Json(BookDetails {
        book,
        current_language: language,
        translated,
        reviews,
    }))
}

/// List reviews of a book
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.services.catalog.list_reviews(id).await?;
    Ok(Json(reviews))
}

/// Review a book
#[utoipa::path(
    post,
    path = "/books/{id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid review", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state
        .services
        .catalog
        .create_review(id, claims.user_id, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Edit one of your reviews
#[utoipa::path(
    put,
    path = "/books/{id}/reviews/{review_id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("review_id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 403, description = "Not the author", body = crate::error::ErrorResponse),
        (status = 404, description = "Review not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, review_id)): Path<(i32, i32)>,
    ApiJson(data): ApiJson<UpdateReview>,
) -> AppResult<Json<Review>> {
    let review = state
        .services
        .catalog
        .update_review(id, review_id, claims.user_id, &data)
        .await?;
    Ok(Json(review))
}

/// Delete one of your reviews
#[utoipa::path(
    delete,
    path = "/books/{id}/reviews/{review_id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("review_id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "No such review of yours", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, review_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .services
        .catalog
        .delete_review(id, review_id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
