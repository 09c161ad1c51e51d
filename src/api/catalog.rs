//! Public catalog endpoints: home page counters, lists and details

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use super::PageQuery;
use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetail},
        book::{BookDetail, BookListItem},
        page::Page,
    },
    services::catalog::SummaryCounts,
};

/// Longest session id accepted from a client cookie
const MAX_SESSION_ID_LEN: usize = 64;

fn valid_session_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Home page counters, counting this visit
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Record counts and session visit count", body = SummaryCounts),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<SummaryCounts>)> {
    let cookie_name = state.config.session.cookie_name.clone();

    let existing = jar
        .get(&cookie_name)
        .map(|c| c.value().to_string())
        .filter(|id| valid_session_id(id));

    let (jar, session_id) = match existing {
        Some(id) => (jar, id),
        None => {
            let id = Uuid::new_v4().simple().to_string();
            let cookie = Cookie::build((cookie_name, id.clone()))
                .path("/")
                .http_only(true);
            (jar.add(cookie), id)
        }
    };

    let counts = state.services.catalog.summary_counts(&session_id).await?;
    Ok((jar, Json(counts)))
}

/// List books
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = Page<BookListItem>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<BookListItem>>> {
    let page = state.services.catalog.list_books(query.page).await?;
    Ok(Json(page))
}

/// Get book details
#[utoipa::path(
    get,
    path = "/catalog/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book with author, language, genres and copies", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.book_detail(id).await?;
    Ok(Json(book))
}

/// List authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of authors", body = Page<Author>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Author>>> {
    let page = state.services.catalog.list_authors(query.page).await?;
    Ok(Json(page))
}

/// Get author details
#[utoipa::path(
    get,
    path = "/catalog/authors/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author with their books", body = AuthorDetail),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.catalog.author_detail(id).await?;
    Ok(Json(author))
}
