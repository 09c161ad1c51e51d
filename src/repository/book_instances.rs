//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, BookInstanceAdminRow, BookInstanceForm},
        enums::{BookInstanceFilter, DateRange, LoanStatus},
        page::PageRequest,
    },
};

const INSTANCE_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.borrower_id, bi.status,
           b.title AS book_title, u.username AS borrower_username
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
    LEFT JOIN users u ON u.id = bi.borrower_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: Uuid, today: NaiveDate) -> AppResult<BookInstance> {
        let query = format!("{} WHERE bi.id = $1", INSTANCE_SELECT);
        sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|i| i.with_overdue_flag(today))
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Copies of a book, earliest due first
    pub async fn list_by_book(&self, book_id: i32, today: NaiveDate) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "{} WHERE bi.book_id = $1 ORDER BY bi.due_back, bi.id",
            INSTANCE_SELECT
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|i| i.with_overdue_flag(today)).collect())
    }

    /// Admin change list, filtered by status and due date
    pub async fn admin_list(
        &self,
        filter: &BookInstanceFilter,
        today: NaiveDate,
        page: &PageRequest,
    ) -> AppResult<(Vec<BookInstanceAdminRow>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.status.is_some() {
            conditions.push(format!("bi.status = ${}", idx));
            idx += 1;
        }

        let range = filter.due_back.map(|f| f.range(today));
        match range {
            Some(DateRange::Between(_, _)) => {
                conditions.push(format!("bi.due_back >= ${} AND bi.due_back < ${}", idx, idx + 1));
                idx += 2;
            }
            Some(DateRange::IsNull) => conditions.push("bi.due_back IS NULL".to_string()),
            Some(DateRange::IsNotNull) => conditions.push("bi.due_back IS NOT NULL".to_string()),
            None => {}
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM book_instances bi {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(status) = filter.status {
            count_builder = count_builder.bind(status);
        }
        if let Some(DateRange::Between(start, end)) = range {
            count_builder = count_builder.bind(start).bind(end);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT b.title AS book, bi.status, u.username AS borrower, bi.due_back, bi.id
            FROM book_instances bi
            LEFT JOIN books b ON b.id = bi.book_id
            LEFT JOIN users u ON u.id = bi.borrower_id
            {}
            ORDER BY bi.due_back, bi.id
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            idx,
            idx + 1
        );
        let mut builder = sqlx::query_as::<_, BookInstanceAdminRow>(&select_query);
        if let Some(status) = filter.status {
            builder = builder.bind(status);
        }
        if let Some(DateRange::Between(start, end)) = range {
            builder = builder.bind(start).bind(end);
        }
        let rows = builder
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(&self, data: &BookInstanceForm) -> AppResult<Uuid> {
        let mut conn = self.pool.acquire().await?;
        insert(&mut conn, data).await
    }

    pub async fn update(&self, id: Uuid, data: &BookInstanceForm) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        update(&mut conn, id, data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        delete(&mut conn, id).await
    }
}

// =========================================================================
// Connection-level statements, shared with inline saves on books
// =========================================================================

/// Insert a copy, generating its id unless the form supplies one
pub(crate) async fn insert(conn: &mut PgConnection, data: &BookInstanceForm) -> AppResult<Uuid> {
    let id = data.id.unwrap_or_else(Uuid::new_v4);

    sqlx::query(
        r#"
        INSERT INTO book_instances (id, book_id, imprint, due_back, borrower_id, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(data.book)
    .bind(&data.imprint)
    .bind(data.due_back)
    .bind(data.borrower)
    .bind(data.status)
    .execute(&mut *conn)
    .await?;

    Ok(id)
}

pub(crate) async fn update(conn: &mut PgConnection, id: Uuid, data: &BookInstanceForm) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE book_instances SET
            book_id = $1,
            imprint = $2,
            due_back = $3,
            borrower_id = $4,
            status = $5
        WHERE id = $6
        "#,
    )
    .bind(data.book)
    .bind(&data.imprint)
    .bind(data.due_back)
    .bind(data.borrower)
    .bind(data.status)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Book instance {} not found", id)));
    }
    Ok(())
}

pub(crate) async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Book instance {} not found", id)));
    }
    Ok(())
}

/// Owning book of a copy, `None` when the copy does not exist
pub(crate) async fn owner(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Option<i32>>> {
    let row: Option<Option<i32>> = sqlx::query_scalar("SELECT book_id FROM book_instances WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}
