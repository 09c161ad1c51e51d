//! Administrative management service: CRUD, inline saves and layouts

use uuid::Uuid;
use validator::Validate;

use super::today;
use crate::{
    error::{AppError, AppResult},
    models::{
        admin::{AdminModel, ModelAdminLayout},
        author::{AuthorAdminRow, AuthorDetail, AuthorSave},
        book::{BookAdminRow, BookDetail, BookSave},
        book_instance::{BookInstance, BookInstanceAdminRow, BookInstanceForm},
        enums::BookInstanceFilter,
        genre::{Genre, GenreForm},
        language::{Language, LanguageForm},
        page::{Page, PageRequest},
        user::UserShort,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AdminService {
    repository: Repository,
    page_size: i64,
}

impl AdminService {
    pub fn new(repository: Repository, page_size: i64) -> Self {
        Self { repository, page_size }
    }

    fn page(&self, page: Option<i64>) -> AppResult<PageRequest> {
        PageRequest::new(page, self.page_size)
    }

    /// Display configuration of a model's admin pages
    pub fn layout(&self, model: AdminModel) -> ModelAdminLayout {
        model.layout(self.page_size)
    }

    /// Users offered as borrower choices
    pub async fn borrowers(&self) -> AppResult<Vec<UserShort>> {
        self.repository.users.list_short().await
    }

    // =========================================================================
    // Genres
    // =========================================================================

    pub async fn list_genres(&self, page: Option<i64>) -> AppResult<Page<Genre>> {
        let request = self.page(page)?;
        let (items, total) = self.repository.genres.list(&request).await?;
        Page::new(items, total, request)
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, form: &GenreForm) -> AppResult<Genre> {
        form.validate()?;
        let genre = self.repository.genres.create(form).await?;
        tracing::info!("Admin: created genre id={} ({})", genre.id, genre);
        Ok(genre)
    }

    pub async fn update_genre(&self, id: i32, form: &GenreForm) -> AppResult<Genre> {
        form.validate()?;
        let genre = self.repository.genres.update(id, form).await?;
        tracing::info!("Admin: updated genre id={}", id);
        Ok(genre)
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await?;
        tracing::info!("Admin: deleted genre id={}", id);
        Ok(())
    }

    // =========================================================================
    // Languages
    // =========================================================================

    pub async fn list_languages(&self, page: Option<i64>) -> AppResult<Page<Language>> {
        let request = self.page(page)?;
        let (items, total) = self.repository.languages.list(&request).await?;
        Page::new(items, total, request)
    }

    pub async fn get_language(&self, id: i32) -> AppResult<Language> {
        self.repository.languages.get_by_id(id).await
    }

    pub async fn create_language(&self, form: &LanguageForm) -> AppResult<Language> {
        form.validate()?;
        let language = self.repository.languages.create(form).await?;
        tracing::info!("Admin: created language id={} ({})", language.id, language);
        Ok(language)
    }

    pub async fn update_language(&self, id: i32, form: &LanguageForm) -> AppResult<Language> {
        form.validate()?;
        let language = self.repository.languages.update(id, form).await?;
        tracing::info!("Admin: updated language id={}", id);
        Ok(language)
    }

    /// Books in this language keep existing with no language
    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await?;
        tracing::info!("Admin: deleted language id={}", id);
        Ok(())
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub async fn list_authors(&self, page: Option<i64>) -> AppResult<Page<AuthorAdminRow>> {
        let request = self.page(page)?;
        let (items, total) = self.repository.authors.admin_list(&request).await?;
        Page::new(items, total, request)
    }

    /// Author with the books edited inline
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn create_author(&self, data: &AuthorSave) -> AppResult<AuthorDetail> {
        self.check_author(data)?;
        let id = self.repository.authors.save_with_books(None, data).await?;
        tracing::info!("Admin: created author id={} with {} inline book row(s)", id, data.books.len());
        self.get_author(id).await
    }

    pub async fn update_author(&self, id: i32, data: &AuthorSave) -> AppResult<AuthorDetail> {
        self.check_author(data)?;
        self.repository.authors.save_with_books(Some(id), data).await?;
        tracing::info!("Admin: updated author id={} with {} inline book row(s)", id, data.books.len());
        self.get_author(id).await
    }

    /// Deletes the author's books and their copies as well
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Admin: deleted author id={}", id);
        Ok(())
    }

    fn check_author(&self, data: &AuthorSave) -> AppResult<()> {
        data.author.check()?;
        for (index, row) in data.books.iter().enumerate() {
            if row.delete {
                continue;
            }
            row.book
                .validate()
                .map_err(|e| AppError::from(e).in_inline_row("books", index))?;
        }
        Ok(())
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub async fn list_books(&self, page: Option<i64>) -> AppResult<Page<BookAdminRow>> {
        let request = self.page(page)?;
        let (items, total) = self.repository.books.admin_list(&request).await?;
        Page::new(items, total, request)
    }

    /// Book with the copies edited inline
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id, today()).await
    }

    pub async fn create_book(&self, data: &BookSave) -> AppResult<BookDetail> {
        self.check_book(data)?;
        let id = self.repository.books.save_with_instances(None, data).await?;
        tracing::info!("Admin: created book id={} with {} inline copy row(s)", id, data.instances.len());
        self.get_book(id).await
    }

    pub async fn update_book(&self, id: i32, data: &BookSave) -> AppResult<BookDetail> {
        self.check_book(data)?;
        self.repository.books.save_with_instances(Some(id), data).await?;
        tracing::info!("Admin: updated book id={} with {} inline copy row(s)", id, data.instances.len());
        self.get_book(id).await
    }

    /// Deletes the book's copies as well
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Admin: deleted book id={}", id);
        Ok(())
    }

    fn check_book(&self, data: &BookSave) -> AppResult<()> {
        data.book.validate()?;
        for (index, row) in data.instances.iter().enumerate() {
            if row.delete {
                continue;
            }
            // Book id is not known yet on create; it does not take part in validation.
            row.to_form(0)
                .validate()
                .map_err(|e| AppError::from(e).in_inline_row("instances", index))?;
        }
        Ok(())
    }

    // =========================================================================
    // Book instances
    // =========================================================================

    pub async fn list_book_instances(&self, filter: &BookInstanceFilter) -> AppResult<Page<BookInstanceAdminRow>> {
        let request = self.page(filter.page)?;
        let (items, total) = self
            .repository
            .book_instances
            .admin_list(filter, today(), &request)
            .await?;
        Page::new(items, total, request)
    }

    pub async fn get_book_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id, today()).await
    }

    pub async fn create_book_instance(&self, form: &BookInstanceForm) -> AppResult<BookInstance> {
        form.validate()?;
        let id = self.repository.book_instances.create(form).await?;
        tracing::info!("Admin: created book instance {}", id);
        self.get_book_instance(id).await
    }

    /// The id in the form is ignored; copies keep their id for life.
    pub async fn update_book_instance(&self, id: Uuid, form: &BookInstanceForm) -> AppResult<BookInstance> {
        form.validate()?;
        self.repository.book_instances.update(id, form).await?;
        tracing::info!("Admin: updated book instance {}", id);
        self.get_book_instance(id).await
    }

    pub async fn delete_book_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await?;
        tracing::info!("Admin: deleted book instance {}", id);
        Ok(())
    }
}
