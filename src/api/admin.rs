//! Admin display configuration and choice lists

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::{AdminModel, ModelAdminLayout},
        user::UserShort,
    },
};

/// Display configuration of one admin model
#[utoipa::path(
    get,
    path = "/admin/layouts/{model}",
    tag = "admin",
    params(
        ("model" = String, Path, description = "genres, languages, authors, books or book-instances")
    ),
    responses(
        (status = 200, description = "Layout descriptor", body = ModelAdminLayout),
        (status = 404, description = "Unknown model")
    )
)]
pub async fn get_layout(
    State(state): State<crate::AppState>,
    Path(model): Path<String>,
) -> AppResult<Json<ModelAdminLayout>> {
    let model: AdminModel = model.parse().map_err(AppError::NotFound)?;
    Ok(Json(state.services.admin.layout(model)))
}

/// Users that can be chosen as borrower of a copy
#[utoipa::path(
    get,
    path = "/admin/borrowers",
    tag = "admin",
    responses(
        (status = 200, description = "Borrower choices", body = Vec<UserShort>)
    )
)]
pub async fn list_borrowers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<UserShort>>> {
    let users = state.services.admin.borrowers().await?;
    Ok(Json(users))
}
