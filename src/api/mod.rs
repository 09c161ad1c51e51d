//! API handlers for the Local Library REST endpoints

pub mod admin;
pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod languages;
pub mod openapi;

use serde::Deserialize;
use utoipa::IntoParams;

/// Page selector shared by list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}
