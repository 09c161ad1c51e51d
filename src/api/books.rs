//! Book admin endpoints, copies edited inline

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::PageQuery;
use crate::{
    error::AppResult,
    models::{
        book::{BookAdminRow, BookDetail, BookSave},
        page::Page,
    },
};

/// List books (change list)
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "admin",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = Page<BookAdminRow>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<BookAdminRow>>> {
    let page = state.services.admin.list_books(query.page).await?;
    Ok(Json(page))
}

/// Get book with its copies
#[utoipa::path(
    get,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book with inline copies", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.admin.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book, with optional inline copies
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "admin",
    request_body = BookSave,
    responses(
        (status = 201, description = "Book created", body = BookDetail),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<BookSave>,
) -> AppResult<(StatusCode, Json<BookDetail>)> {
    let created = state.services.admin.create_book(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book and its inline copies in one save
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookSave,
    responses(
        (status = 200, description = "Book updated", body = BookDetail),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book or inline copy not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<BookSave>,
) -> AppResult<Json<BookDetail>> {
    let updated = state.services.admin.update_book(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a book along with its copies
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.admin.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
