//! Users repository (read-only, accounts belong to the identity provider)

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::user::UserShort};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Users that can be picked as borrower
    pub async fn list_short(&self) -> AppResult<Vec<UserShort>> {
        let rows = sqlx::query_as::<_, UserShort>(
            "SELECT id, username, first_name, last_name FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
