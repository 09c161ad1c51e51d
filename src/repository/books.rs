//! Books repository for database operations

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use super::book_instances;
use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookAdminRecord, BookAdminRow, BookDetail, BookForm, BookListItem, BookSave},
        genre::Genre,
        language::Language,
        page::PageRequest,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn, language_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Public list page, in id order
    pub async fn list_page(&self, page: &PageRequest) -> AppResult<Vec<BookListItem>> {
        let rows = sqlx::query_as::<_, BookListItem>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name END AS author
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books written by an author
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author_id, summary, isbn, language_id
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Book with author, language, genres and copies
    pub async fn get_detail(&self, id: i32, today: NaiveDate) -> AppResult<BookDetail> {
        let book = self.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>(
                    "SELECT id, first_name, last_name, date_of_birth, date_of_death FROM authors WHERE id = $1",
                )
                .bind(author_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => None,
        };

        let language = match book.language_id {
            Some(language_id) => {
                sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE id = $1")
                    .bind(language_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let genres = self.get_genres(id).await?;

        let instances = book_instances::BookInstancesRepository::new(self.pool.clone())
            .list_by_book(id, today)
            .await?;

        Ok(BookDetail {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            language,
            genres,
            instances,
        })
    }

    /// Genres of a book via the book_genres junction table
    pub async fn get_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Admin change list with the author label and genre names
    pub async fn admin_list(&self, page: &PageRequest) -> AppResult<(Vec<BookAdminRow>, i64)> {
        let total = self.count().await?;

        let rows = sqlx::query_as::<_, BookAdminRecord>(
            r#"
            SELECT b.id, b.title,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name END AS author,
                   COALESCE(
                       (SELECT array_agg(g.name::text ORDER BY g.id)
                        FROM book_genres bg JOIN genres g ON g.id = bg.genre_id
                        WHERE bg.book_id = b.id),
                       ARRAY[]::text[]
                   ) AS genre_names
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(BookAdminRow::from).collect(), total))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Delete a book together with its copies
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Save a book and its inline copy rows in one transaction.
    /// Returns the book id.
    pub async fn save_with_instances(&self, id: Option<i32>, data: &BookSave) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let book_id = match id {
            Some(id) => {
                update(&mut tx, id, &data.book, data.book.author).await?;
                id
            }
            None => insert(&mut tx, &data.book, data.book.author).await?,
        };

        for (index, row) in data.instances.iter().enumerate() {
            match row.id {
                Some(instance_id) => {
                    match book_instances::owner(&mut tx, instance_id).await? {
                        Some(Some(owner)) if owner == book_id => {}
                        _ => {
                            return Err(AppError::NotFound(format!(
                                "Book instance {} not found for book {}",
                                instance_id, book_id
                            )))
                        }
                    }
                    if row.delete {
                        book_instances::delete(&mut tx, instance_id)
                            .await
                            .map_err(|e| e.in_inline_row("instances", index))?;
                    } else {
                        book_instances::update(&mut tx, instance_id, &row.to_form(book_id))
                            .await
                            .map_err(|e| e.in_inline_row("instances", index))?;
                    }
                }
                None if row.delete => {}
                None => {
                    book_instances::insert(&mut tx, &row.to_form(book_id))
                        .await
                        .map_err(|e| e.in_inline_row("instances", index))?;
                }
            }
        }

        tx.commit().await?;
        Ok(book_id)
    }
}

// =========================================================================
// Connection-level statements, shared with inline saves on authors
// =========================================================================

pub(crate) async fn insert(conn: &mut PgConnection, data: &BookForm, author_id: Option<i32>) -> AppResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO books (title, author_id, summary, isbn, language_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&data.title)
    .bind(author_id)
    .bind(&data.summary)
    .bind(&data.isbn)
    .bind(data.language)
    .fetch_one(&mut *conn)
    .await?;

    sync_genres(conn, id, &data.genres).await?;
    Ok(id)
}

pub(crate) async fn update(
    conn: &mut PgConnection,
    id: i32,
    data: &BookForm,
    author_id: Option<i32>,
) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE books SET
            title = $1,
            author_id = $2,
            summary = $3,
            isbn = $4,
            language_id = $5
        WHERE id = $6
        "#,
    )
    .bind(&data.title)
    .bind(author_id)
    .bind(&data.summary)
    .bind(&data.isbn)
    .bind(data.language)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Book with id {} not found", id)));
    }

    sync_genres(conn, id, &data.genres).await
}

pub(crate) async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Book with id {} not found", id)));
    }
    Ok(())
}

/// Author of a book, `None` when the book does not exist
pub(crate) async fn owner(conn: &mut PgConnection, id: i32) -> AppResult<Option<Option<i32>>> {
    let row: Option<Option<i32>> = sqlx::query_scalar("SELECT author_id FROM books WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Replace the genres of a book
async fn sync_genres(conn: &mut PgConnection, book_id: i32, genres: &[i32]) -> AppResult<()> {
    sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
        .bind(book_id)
        .execute(&mut *conn)
        .await?;

    let mut seen = Vec::with_capacity(genres.len());
    for genre_id in genres {
        if seen.contains(genre_id) {
            continue;
        }
        seen.push(*genre_id);

        sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
            .bind(book_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
