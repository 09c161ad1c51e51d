//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::LoanStatus;

/// Full book instance model from database. Listed by `due_back`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique ID for this particular book across whole library
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    /// Book availability
    pub status: LoanStatus,
    // Computed fields (populated when queried with JOINs, None otherwise)
    #[sqlx(default)]
    #[serde(default)]
    pub book_title: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub borrower_username: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub is_overdue: bool,
}

impl BookInstance {
    /// Due date set and strictly before `today`
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        matches!(self.due_back, Some(due) if due < today)
    }

    pub fn with_overdue_flag(mut self, today: NaiveDate) -> Self {
        self.is_overdue = self.is_overdue_on(today);
        self
    }
}

impl std::fmt::Display for BookInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.book_title {
            Some(ref title) => write!(f, "{} ({})", self.id, title),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Admin change-list row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookInstanceAdminRow {
    /// Title of the book
    pub book: Option<String>,
    pub status: LoanStatus,
    /// Username of the borrower
    pub borrower: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub id: Uuid,
}

/// Create or update book instance request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookInstanceForm {
    /// Generated when omitted on create
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub book: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters"))]
    pub imprint: String,
    #[serde(default)]
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub borrower: Option<i32>,
    #[serde(default)]
    pub status: LoanStatus,
}

/// Copy row edited inline on its book.
///
/// Without `id` the row is created under a fresh id; with `id` it updates
/// that copy, or deletes it when `delete` is set.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InlineBookInstance {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub delete: bool,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub borrower: Option<i32>,
    #[serde(default)]
    pub status: LoanStatus,
}

impl InlineBookInstance {
    /// Form for this row under the given book
    pub fn to_form(&self, book_id: i32) -> BookInstanceForm {
        BookInstanceForm {
            id: self.id,
            book: Some(book_id),
            imprint: self.imprint.clone(),
            due_back: self.due_back,
            borrower: self.borrower,
            status: self.status,
        }
    }
}
