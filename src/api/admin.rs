//! Administration endpoints (admin role required)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        branch::{BranchInfo, CreateBranch, SetStock, Stock},
        translation::{
            CachedTranslationQuery, CachedTranslationSummary, LanguagePreference, LanguagePreferenceQuery,
        },
    },
    AppState,
};

use super::{ApiJson, AuthenticatedUser, PaginatedResponse};

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 403, description = "Not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;
    let book = state.services.catalog.create_book(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_admin()?;
    let book = state.services.catalog.update_book(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book with its reviews and stock
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a library branch
#[utoipa::path(
    post,
    path = "/admin/branches",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBranch,
    responses(
        (status = 201, description = "Branch created", body = BranchInfo)
    )
)]
pub async fn create_branch(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateBranch>,
) -> AppResult<(StatusCode, Json<BranchInfo>)> {
    claims.require_admin()?;
    let branch = state.services.branches.create(&data).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// Set how many copies of a book a branch holds
#[utoipa::path(
    put,
    path = "/admin/stock",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = SetStock,
    responses(
        (status = 200, description = "Stock stored", body = Stock),
        (status = 404, description = "Book or branch not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_stock(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<SetStock>,
) -> AppResult<Json<Stock>> {
    claims.require_admin()?;
    let stock = state.services.branches.set_stock(&data).await?;
    Ok(Json(stock))
}

/// Browse the translation cache
#[utoipa::path(
    get,
    path = "/admin/translations",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(CachedTranslationQuery),
    responses(
        (status = 200, description = "Cached translations, newest first", body = PaginatedResponse<CachedTranslationSummary>)
    )
)]
pub async fn list_cached_translations(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<CachedTranslationQuery>,
) -> AppResult<Json<PaginatedResponse<CachedTranslationSummary>>> {
    claims.require_admin()?;
    let (entries, total) = state.services.admin.cached_translations(&query).await?;
    Ok(Json(PaginatedResponse::new(entries, total, query.page, query.per_page)))
}

/// Browse users' language preferences
#[utoipa::path(
    get,
    path = "/admin/preferences",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(LanguagePreferenceQuery),
    responses(
        (status = 200, description = "Preferences, most recently updated first", body = PaginatedResponse<LanguagePreference>)
    )
)]
pub async fn list_preferences(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<LanguagePreferenceQuery>,
) -> AppResult<Json<PaginatedResponse<LanguagePreference>>> {
    claims.require_admin()?;
    let (rows, total) = state.services.admin.language_preferences(&query).await?;
    Ok(Json(PaginatedResponse::new(rows, total, query.page, query.per_page)))
}
