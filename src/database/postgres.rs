use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::user::UserRow;
use crate::database::models::{DataRecord, NewDataRecord, NewUser, User};
use crate::database::repository::Repository;
use crate::database::DatabaseError;

/// [`Repository`] backed by PostgreSQL
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, role",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::Conflict("Email already registered".to_string())
            }
            other => DatabaseError::Sqlx(other),
        })?;

        User::try_from(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, role
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn list_data(&self) -> Result<Vec<DataRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, DataRecord>(
            "SELECT id, title, description FROM data ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create_data(&self, record: NewDataRecord) -> Result<DataRecord, DatabaseError> {
        let row = sqlx::query_as::<_, DataRecord>(
            "INSERT INTO data (title, description)
             VALUES ($1, $2)
             RETURNING id, title, description",
        )
        .bind(&record.title)
        .bind(&record.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_data(
        &self,
        id: i32,
        record: NewDataRecord,
    ) -> Result<Option<DataRecord>, DatabaseError> {
        let row = sqlx::query_as::<_, DataRecord>(
            "UPDATE data SET title = $1, description = $2
             WHERE id = $3
             RETURNING id, title, description",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_data(&self, id: i32) -> Result<Option<DataRecord>, DatabaseError> {
        let row = sqlx::query_as::<_, DataRecord>(
            "DELETE FROM data WHERE id = $1 RETURNING id, title, description",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
