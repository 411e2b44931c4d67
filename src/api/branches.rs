//! Branch and availability endpoints (map data)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::branch::{BranchInfo, BranchStockInfo},
    AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct BranchListResponse {
    pub branches: Vec<BranchInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookBranchesResponse {
    pub book_id: i32,
    pub book_title: String,
    pub branches: Vec<BranchStockInfo>,
}

/// List all library branches
#[utoipa::path(
    get,
    path = "/branches",
    tag = "branches",
    responses(
        (status = 200, description = "All branches with coordinates", body = BranchListResponse)
    )
)]
pub async fn list_branches(State(state): State<AppState>) -> AppResult<Json<BranchListResponse>> {
    let branches = state.services.branches.list().await?;
    Ok(Json(BranchListResponse { branches }))
}

/// Branches that currently hold copies of a book
#[utoipa::path(
    get,
    path = "/books/{id}/branches",
    tag = "branches",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Branches with stock", body = BookBranchesResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_branches(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookBranchesResponse>> {
    let (book, branches) = state.services.branches.availability(id).await?;
    Ok(Json(BookBranchesResponse {
        book_id: book.id,
        book_title: book.title,
        branches,
    }))
}
