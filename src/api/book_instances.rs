//! Book instance (physical copy) admin endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book_instance::{BookInstance, BookInstanceAdminRow, BookInstanceForm},
        enums::BookInstanceFilter,
        page::Page,
    },
};

/// List copies, filtered by status and due date
#[utoipa::path(
    get,
    path = "/admin/book-instances",
    tag = "admin",
    params(BookInstanceFilter),
    responses(
        (status = 200, description = "Page of copies", body = Page<BookInstanceAdminRow>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
    Query(filter): Query<BookInstanceFilter>,
) -> AppResult<Json<Page<BookInstanceAdminRow>>> {
    let page = state.services.admin.list_book_instances(&filter).await?;
    Ok(Json(page))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/admin/book-instances/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Book instance", body = BookInstance),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.admin.get_book_instance(id).await?;
    Ok(Json(instance))
}

/// Create a copy. The id is generated unless supplied.
#[utoipa::path(
    post,
    path = "/admin/book-instances",
    tag = "admin",
    request_body = BookInstanceForm,
    responses(
        (status = 201, description = "Book instance created", body = BookInstance),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book_instance(
    State(state): State<crate::AppState>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    let created = state.services.admin.create_book_instance(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a copy
#[utoipa::path(
    put,
    path = "/admin/book-instances/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    request_body = BookInstanceForm,
    responses(
        (status = 200, description = "Book instance updated", body = BookInstance),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<Json<BookInstance>> {
    let updated = state.services.admin.update_book_instance(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/admin/book-instances/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 204, description = "Book instance deleted"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn delete_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.admin.delete_book_instance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
