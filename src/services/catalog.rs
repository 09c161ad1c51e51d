//! Catalog browsing service (read-only)

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use super::{session::SessionStore, today};
use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetail},
        book::{BookDetail, BookListItem},
        enums::LoanStatus,
        page::{Page, PageRequest},
    },
    repository::Repository,
};

/// Home page counters
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryCounts {
    pub num_books: i64,
    pub num_instances: i64,
    /// Copies with status Available
    pub num_instances_available: i64,
    pub num_authors: i64,
    /// Visits of the current session, this one included
    pub num_visits: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    sessions: Arc<dyn SessionStore>,
    page_size: i64,
}

impl CatalogService {
    pub fn new(repository: Repository, sessions: Arc<dyn SessionStore>, page_size: i64) -> Self {
        Self {
            repository,
            sessions,
            page_size,
        }
    }

    /// Record counts plus the visit counter of the session
    pub async fn summary_counts(&self, session_id: &str) -> AppResult<SummaryCounts> {
        let num_books = self.repository.books.count().await?;
        let num_instances = self.repository.book_instances.count().await?;
        let num_instances_available = self
            .repository
            .book_instances
            .count_by_status(LoanStatus::Available)
            .await?;
        let num_authors = self.repository.authors.count().await?;
        let num_visits = self.sessions.incr_visits(session_id).await?;

        Ok(SummaryCounts {
            num_books,
            num_instances,
            num_instances_available,
            num_authors,
            num_visits,
        })
    }

    pub async fn list_books(&self, page: Option<i64>) -> AppResult<Page<BookListItem>> {
        let request = PageRequest::new(page, self.page_size)?;
        let total = self.repository.books.count().await?;
        let items = self.repository.books.list_page(&request).await?;
        Page::new(items, total, request)
    }

    pub async fn list_authors(&self, page: Option<i64>) -> AppResult<Page<Author>> {
        let request = PageRequest::new(page, self.page_size)?;
        let total = self.repository.authors.count().await?;
        let items = self.repository.authors.list_page(&request).await?;
        Page::new(items, total, request)
    }

    pub async fn book_detail(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id, today()).await
    }

    pub async fn author_detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetail { author, books })
    }

    /// Database and session store both answer
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await?;
        self.sessions.ping().await
    }
}
