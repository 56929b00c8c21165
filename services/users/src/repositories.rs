//! Repositories for database operations

use async_trait::async_trait;
use common::error::DatabaseError;
use sqlx::PgPool;
use tracing::info;

use crate::{
    error::{UserError, UserResult},
    models::{NewUser, UpdateUser, User},
};

/// Creates the `users` table and the trigger keeping `updated_at` current.
///
/// Safe to run any number of times.
const MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(256) NOT NULL DEFAULT '',
    email VARCHAR(256) NOT NULL CHECK (email <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE OR REPLACE FUNCTION users_set_updated_at() RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at := now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS users_updated_at ON users;
CREATE TRIGGER users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION users_set_updated_at();
"#;

/// Operations on the `users` table
///
/// Every method maps to exactly one statement sent to the database.
#[async_trait]
pub trait UserController: Send + Sync {
    /// Insert a user and return it with its assigned id and timestamps
    async fn create(&self, new_user: &NewUser) -> UserResult<User>;

    /// All users, ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// A single user, or [`UserError::NotFound`]
    async fn get(&self, id: i32) -> UserResult<User>;

    /// Replace name and email, or [`UserError::NotFound`]
    async fn update(&self, id: i32, changes: &UpdateUser) -> UserResult<User>;

    /// Delete a user. Deleting an absent id is not an error.
    async fn delete(&self, id: i32) -> UserResult<()>;

    /// Ensure the schema exists
    async fn migrate(&self) -> UserResult<()>;
}

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserController for UserRepository {
    async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(users)
    }

    async fn get(&self, id: i32) -> UserResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?
        .ok_or(UserError::NotFound)
    }

    async fn update(&self, id: i32, changes: &UpdateUser) -> UserResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2
            WHERE id = $3
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?
        .ok_or(UserError::NotFound)?;

        info!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i32) -> UserResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        info!(user_id = id, rows = result.rows_affected(), "Deleted user");
        Ok(())
    }

    async fn migrate(&self) -> UserResult<()> {
        info!("Running users table migration");

        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Migration)?;

        Ok(())
    }
}
