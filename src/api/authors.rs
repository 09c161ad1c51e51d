//! Author admin endpoints, books edited inline

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::PageQuery;
use crate::{
    error::AppResult,
    models::{
        author::{AuthorAdminRow, AuthorDetail, AuthorSave},
        page::Page,
    },
};

/// List authors (change list)
#[utoipa::path(
    get,
    path = "/admin/authors",
    tag = "admin",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of authors", body = Page<AuthorAdminRow>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<AuthorAdminRow>>> {
    let page = state.services.admin.list_authors(query.page).await?;
    Ok(Json(page))
}

/// Get author with their books
#[utoipa::path(
    get,
    path = "/admin/authors/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author with inline books", body = AuthorDetail),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.admin.get_author(id).await?;
    Ok(Json(author))
}

/// Create an author, with optional inline books
#[utoipa::path(
    post,
    path = "/admin/authors",
    tag = "admin",
    request_body = AuthorSave,
    responses(
        (status = 201, description = "Author created", body = AuthorDetail),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(data): Json<AuthorSave>,
) -> AppResult<(StatusCode, Json<AuthorDetail>)> {
    let created = state.services.admin.create_author(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an author and their inline books in one save
#[utoipa::path(
    put,
    path = "/admin/authors/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorSave,
    responses(
        (status = 200, description = "Author updated", body = AuthorDetail),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Author or inline book not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<AuthorSave>,
) -> AppResult<Json<AuthorDetail>> {
    let updated = state.services.admin.update_author(id, &data).await?;
    Ok(Json(updated))
}

/// Delete an author along with their books and copies
#[utoipa::path(
    delete,
    path = "/admin/authors/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.admin.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
