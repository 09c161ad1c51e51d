//! Language model
//!
//! Names are unique regardless of case; the `language_name_case_insensitive_unique`
//! index on `LOWER(name)` enforces it and the repository surfaces a violation as a
//! constraint error on `name`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Create or update language request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LanguageForm {
    /// The book's natural language (e.g. English, French, Japanese etc.)
    #[validate(length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters"))]
    pub name: String,
}
