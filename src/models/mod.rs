//! Data models for the Local Library catalog

pub mod admin;
pub mod author;
pub mod book;
pub mod book_instance;
pub mod enums;
pub mod genre;
pub mod language;
pub mod page;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetail};
pub use book::{Book, BookDetail, BookListItem};
pub use book_instance::BookInstance;
pub use enums::{DueBackFilter, LoanStatus};
pub use genre::Genre;
pub use language::Language;
pub use page::{Page, PageRequest};
pub use user::UserShort;
