//! Language admin endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::PageQuery;
use crate::{
    error::AppResult,
    models::{
        language::{Language, LanguageForm},
        page::Page,
    },
};

/// List languages
#[utoipa::path(
    get,
    path = "/admin/languages",
    tag = "admin",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of languages", body = Page<Language>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Language>>> {
    let page = state.services.admin.list_languages(query.page).await?;
    Ok(Json(page))
}

/// Get language by ID
#[utoipa::path(
    get,
    path = "/admin/languages/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 200, description = "Language", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn get_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Language>> {
    let language = state.services.admin.get_language(id).await?;
    Ok(Json(language))
}

/// Create a language. Names are unique regardless of case.
#[utoipa::path(
    post,
    path = "/admin/languages",
    tag = "admin",
    request_body = LanguageForm,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Invalid input or name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    Json(form): Json<LanguageForm>,
) -> AppResult<(StatusCode, Json<Language>)> {
    let created = state.services.admin.create_language(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a language
#[utoipa::path(
    put,
    path = "/admin/languages/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    request_body = LanguageForm,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 400, description = "Invalid input or name already used", body = crate::error::ErrorResponse),
        (status = 404, description = "Language not found")
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<LanguageForm>,
) -> AppResult<Json<Language>> {
    let updated = state.services.admin.update_language(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a language
#[utoipa::path(
    delete,
    path = "/admin/languages/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.admin.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
