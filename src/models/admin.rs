//! Admin display configuration: which columns a change list shows, how
//! it can be filtered, how the edit form is grouped, and which related
//! records are edited inline.

use serde::Serialize;
use utoipa::ToSchema;

/// A group of form rows. Fields sharing a row are shown side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Fieldset {
    /// Section title, `None` for the unlabeled section
    pub name: Option<String>,
    pub fields: Vec<Vec<String>>,
}

/// Related records edited as rows of the parent form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InlineLayout {
    pub model: String,
    /// Field on the child pointing at the parent
    pub fk_field: String,
    /// Blank rows offered for new children
    pub extra: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModelAdminLayout {
    pub model: String,
    pub list_display: Vec<String>,
    pub list_filter: Vec<String>,
    pub fieldsets: Vec<Fieldset>,
    pub inlines: Vec<InlineLayout>,
    pub list_per_page: i64,
}

/// Entities managed through the admin surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminModel {
    Genre,
    Language,
    Author,
    Book,
    BookInstance,
}

impl std::str::FromStr for AdminModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genres" => Ok(AdminModel::Genre),
            "languages" => Ok(AdminModel::Language),
            "authors" => Ok(AdminModel::Author),
            "books" => Ok(AdminModel::Book),
            "book-instances" => Ok(AdminModel::BookInstance),
            _ => Err(format!("Unknown admin model: {}", s)),
        }
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// One field per row
fn single_rows(names: &[&str]) -> Vec<Vec<String>> {
    names.iter().map(|s| vec![s.to_string()]).collect()
}

impl AdminModel {
    pub fn layout(&self, list_per_page: i64) -> ModelAdminLayout {
        match self {
            AdminModel::Genre => ModelAdminLayout {
                model: "genre".into(),
                list_display: strings(&["name"]),
                list_filter: vec![],
                fieldsets: vec![Fieldset { name: None, fields: single_rows(&["name"]) }],
                inlines: vec![],
                list_per_page,
            },
            AdminModel::Language => ModelAdminLayout {
                model: "language".into(),
                list_display: strings(&["name"]),
                list_filter: vec![],
                fieldsets: vec![Fieldset { name: None, fields: single_rows(&["name"]) }],
                inlines: vec![],
                list_per_page,
            },
            AdminModel::Author => ModelAdminLayout {
                model: "author".into(),
                list_display: strings(&["last_name", "first_name", "date_of_birth", "date_of_death"]),
                list_filter: vec![],
                fieldsets: vec![Fieldset {
                    name: None,
                    fields: vec![
                        strings(&["first_name"]),
                        strings(&["last_name"]),
                        strings(&["date_of_birth", "date_of_death"]),
                    ],
                }],
                inlines: vec![InlineLayout {
                    model: "book".into(),
                    fk_field: "author".into(),
                    extra: 0,
                }],
                list_per_page,
            },
            AdminModel::Book => ModelAdminLayout {
                model: "book".into(),
                list_display: strings(&["title", "author", "display_genre"]),
                list_filter: vec![],
                fieldsets: vec![Fieldset {
                    name: None,
                    fields: single_rows(&["title", "author", "summary", "isbn", "genres", "language"]),
                }],
                inlines: vec![InlineLayout {
                    model: "book_instance".into(),
                    fk_field: "book".into(),
                    extra: 0,
                }],
                list_per_page,
            },
            AdminModel::BookInstance => ModelAdminLayout {
                model: "book_instance".into(),
                list_display: strings(&["book", "status", "borrower", "due_back", "id"]),
                list_filter: strings(&["status", "due_back"]),
                fieldsets: vec![
                    Fieldset {
                        name: None,
                        fields: single_rows(&["book", "imprint", "id"]),
                    },
                    Fieldset {
                        name: Some("Availability".into()),
                        fields: single_rows(&["status", "due_back", "borrower"]),
                    },
                ],
                inlines: vec![],
                list_per_page,
            },
        }
    }
}
