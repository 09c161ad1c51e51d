//! Authors repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use super::books;
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorAdminRow, AuthorForm, AuthorSave},
        page::PageRequest,
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, date_of_birth, date_of_death FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Public list page, by last name
    pub async fn list_page(&self, page: &PageRequest) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY last_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn admin_list(&self, page: &PageRequest) -> AppResult<(Vec<AuthorAdminRow>, i64)> {
        let total = self.count().await?;

        let rows = sqlx::query_as::<_, AuthorAdminRow>(
            r#"
            SELECT last_name, first_name, date_of_birth, date_of_death, id
            FROM authors
            ORDER BY last_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Delete an author; their books and the copies of those books go too.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        Ok(())
    }

    /// Save an author and their inline book rows in one transaction.
    /// Returns the author id.
    pub async fn save_with_books(&self, id: Option<i32>, data: &AuthorSave) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let author_id = match id {
            Some(id) => {
                update(&mut tx, id, &data.author).await?;
                id
            }
            None => insert(&mut tx, &data.author).await?,
        };

        for (index, row) in data.books.iter().enumerate() {
            match row.id {
                Some(book_id) => {
                    match books::owner(&mut tx, book_id).await? {
                        Some(Some(owner)) if owner == author_id => {}
                        _ => {
                            return Err(AppError::NotFound(format!(
                                "Book {} not found for author {}",
                                book_id, author_id
                            )))
                        }
                    }
                    if row.delete {
                        books::delete(&mut tx, book_id)
                            .await
                            .map_err(|e| e.in_inline_row("books", index))?;
                    } else {
                        books::update(&mut tx, book_id, &row.book, Some(author_id))
                            .await
                            .map_err(|e| e.in_inline_row("books", index))?;
                    }
                }
                None if row.delete => {}
                None => {
                    books::insert(&mut tx, &row.book, Some(author_id))
                        .await
                        .map_err(|e| e.in_inline_row("books", index))?;
                }
            }
        }

        tx.commit().await?;
        Ok(author_id)
    }
}

async fn insert(conn: &mut PgConnection, data: &AuthorForm) -> AppResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.date_of_birth)
    .bind(data.date_of_death)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

async fn update(conn: &mut PgConnection, id: i32, data: &AuthorForm) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE authors SET
            first_name = $1,
            last_name = $2,
            date_of_birth = $3,
            date_of_death = $4
        WHERE id = $5
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.date_of_birth)
    .bind(data.date_of_death)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Author with id {} not found", id)));
    }
    Ok(())
}
