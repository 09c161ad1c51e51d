//! Genre admin endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::PageQuery;
use crate::{
    error::AppResult,
    models::{
        genre::{Genre, GenreForm},
        page::Page,
    },
};

/// List genres
#[utoipa::path(
    get,
    path = "/admin/genres",
    tag = "admin",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of genres", body = Page<Genre>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Genre>>> {
    let page = state.services.admin.list_genres(query.page).await?;
    Ok(Json(page))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/admin/genres/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.admin.get_genre(id).await?;
    Ok(Json(genre))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/admin/genres",
    tag = "admin",
    request_body = GenreForm,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    Json(form): Json<GenreForm>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let created = state.services.admin.create_genre(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a genre
#[utoipa::path(
    put,
    path = "/admin/genres/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = GenreForm,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<GenreForm>,
) -> AppResult<Json<Genre>> {
    let updated = state.services.admin.update_genre(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/admin/genres/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.admin.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
