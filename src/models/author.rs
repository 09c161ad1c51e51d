//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::{Book, InlineBook};
use crate::error::{AppError, AppResult};

/// Full author model from database. Listed by last name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Died
    pub date_of_death: Option<NaiveDate>,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Author with the books they wrote
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

/// Admin change-list row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuthorAdminRow {
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub id: i32,
}

/// Create or update author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(length(min = 1, max = 100, message = "Ensure this value has between 1 and 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Ensure this value has between 1 and 100 characters"))]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorForm {
    /// Field rules plus the birth/death ordering
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if let (Some(born), Some(died)) = (self.date_of_birth, self.date_of_death) {
            if died < born {
                return Err(AppError::constraint(
                    "date_of_death",
                    "Date of death cannot be before date of birth",
                ));
            }
        }
        Ok(())
    }
}

/// Author save with inline book rows
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorSave {
    #[serde(flatten)]
    pub author: AuthorForm,
    #[serde(default)]
    pub books: Vec<InlineBook>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AuthorForm {
        AuthorForm {
            first_name: "J.R.R.".to_string(),
            last_name: "Tolkien".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: NaiveDate::from_ymd_opt(1973, 9, 2),
        }
    }

    #[test]
    fn test_display_is_last_first() {
        let author = Author {
            id: 1,
            first_name: "J.R.R.".to_string(),
            last_name: "Tolkien".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert_eq!(author.to_string(), "Tolkien, J.R.R.");
    }

    #[test]
    fn test_valid_form() {
        assert!(form().check().is_ok());
    }

    #[test]
    fn test_death_before_birth_is_rejected() {
        let mut f = form();
        f.date_of_death = NaiveDate::from_ymd_opt(1800, 1, 1);
        match f.check() {
            Err(AppError::ConstraintViolation { field, .. }) => assert_eq!(field, "date_of_death"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_last_name_is_rejected() {
        let mut f = form();
        f.last_name.clear();
        match f.check() {
            Err(AppError::ConstraintViolation { field, .. }) => assert_eq!(field, "last_name"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_save_payload_flattens_author_fields() {
        let save: AuthorSave = serde_json::from_value(serde_json::json!({
            "first_name": "Ursula",
            "last_name": "Le Guin",
            "books": [{ "title": "A Wizard of Earthsea" }, { "id": 4, "delete": true }]
        }))
        .unwrap();
        assert_eq!(save.author.last_name, "Le Guin");
        assert_eq!(save.books.len(), 2);
        assert!(save.books[0].id.is_none());
        assert!(save.books[1].delete);
    }
}
