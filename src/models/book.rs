//! Book (catalog title) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::Author,
    book_instance::{BookInstance, InlineBookInstance},
    genre::Genre,
    language::Language,
};

/// Number of genres shown in change lists
const DISPLAY_GENRE_LIMIT: usize = 3;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    /// ISBN
    pub isbn: String,
    pub language_id: Option<i32>,
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Render the first three genre names, comma separated.
pub fn display_genre<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .take(DISPLAY_GENRE_LIMIT)
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Book with its relations resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

impl BookDetail {
    pub fn display_genre(&self) -> String {
        let names: Vec<&str> = self.genres.iter().map(|g| g.name.as_str()).collect();
        display_genre(&names)
    }
}

/// Public list entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookListItem {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    /// "last_name, first_name" of the author
    pub author: Option<String>,
}

/// Raw change-list row, genres still as names
#[derive(Debug, Clone, FromRow)]
pub struct BookAdminRecord {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub genre_names: Vec<String>,
}

/// Admin change-list row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookAdminRow {
    pub title: String,
    pub author: Option<String>,
    /// Genre
    pub display_genre: String,
    pub id: i32,
}

impl From<BookAdminRecord> for BookAdminRow {
    fn from(r: BookAdminRecord) -> Self {
        Self {
            display_genre: display_genre(&r.genre_names),
            title: r.title,
            author: r.author,
            id: r.id,
        }
    }
}

/// Create or update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub author: Option<i32>,
    /// Enter a brief description of the book
    #[serde(default)]
    #[validate(length(max = 1000, message = "Ensure this value has at most 1000 characters"))]
    pub summary: String,
    /// 13 Character ISBN number
    #[serde(default)]
    #[validate(length(max = 13, message = "Ensure this value has at most 13 characters"))]
    pub isbn: String,
    /// Select a genre for this book
    #[serde(default)]
    pub genres: Vec<i32>,
    #[serde(default)]
    pub language: Option<i32>,
}

/// Book row edited inline on its author.
///
/// Without `id` the row is created; with `id` it updates that book, or
/// deletes it when `delete` is set.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InlineBook {
    pub id: Option<i32>,
    #[serde(default)]
    pub delete: bool,
    #[serde(flatten)]
    pub book: BookForm,
}

/// Book save with inline copy rows
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookSave {
    #[serde(flatten)]
    pub book: BookForm,
    #[serde(default)]
    pub instances: Vec<InlineBookInstance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_genre_keeps_first_three() {
        assert_eq!(display_genre(&["G1", "G2", "G3", "G4"]), "G1, G2, G3");
    }

    #[test]
    fn test_display_genre_short_lists() {
        assert_eq!(display_genre::<&str>(&[]), "");
        assert_eq!(display_genre(&["Fantasy"]), "Fantasy");
        assert_eq!(display_genre(&["Fantasy", "Epic"]), "Fantasy, Epic");
    }

    #[test]
    fn test_admin_row_uses_display_genre() {
        let row = BookAdminRow::from(BookAdminRecord {
            id: 7,
            title: "The Hobbit".to_string(),
            author: Some("Tolkien, J.R.R.".to_string()),
            genre_names: vec!["Fantasy".into(), "Children".into(), "Adventure".into(), "Classic".into()],
        });
        assert_eq!(row.display_genre, "Fantasy, Children, Adventure");
        assert_eq!(row.id, 7);
    }

    #[test]
    fn test_detail_display_genre_uses_genre_names() {
        let detail = BookDetail {
            id: 1,
            title: "The Hobbit".to_string(),
            summary: String::new(),
            isbn: String::new(),
            author: None,
            language: None,
            genres: vec![
                Genre { id: 1, name: "Fantasy".to_string() },
                Genre { id: 2, name: "Children".to_string() },
            ],
            instances: vec![],
        };
        assert_eq!(detail.display_genre(), "Fantasy, Children");
    }

    #[test]
    fn test_isbn_longer_than_thirteen_is_rejected() {
        let form = BookForm {
            title: "The Hobbit".into(),
            isbn: "97800000000000".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("isbn"));
    }

    #[test]
    fn test_summary_limit() {
        let form = BookForm {
            title: "The Hobbit".into(),
            summary: "x".repeat(1001),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        let form = BookForm {
            title: "The Hobbit".into(),
            summary: "x".repeat(1000),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        assert!(BookForm::default().validate().is_err());
    }
}
