use sqlx::SqlitePool;

use crate::models::{User, USER_STATUS_DELETED};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_name(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, username, first_name, last_name, email, password, phone, user_status \
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert one user; the unique index on `username` rejects duplicates.
    pub async fn create(&self, user: &User) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, first_name, last_name, email, password, phone, user_status) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.phone)
        .bind(user.user_status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Batch insert; all-or-nothing inside one transaction.
    pub async fn create_many(&self, users: &[User]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for user in users {
            sqlx::query(
                "INSERT INTO users (username, first_name, last_name, email, password, phone, user_status) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&user.username)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.phone)
            .bind(user.user_status)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Profile update keyed by the current username. The password column is
    /// deliberately left untouched.
    pub async fn update(&self, username: &str, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET username = ?, first_name = ?, last_name = ?, email = ?, \
             phone = ?, user_status = ? WHERE username = ?",
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.user_status)
        .bind(username)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Soft delete: mark the row, keep the username reserved.
    pub async fn delete(&self, username: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET user_status = ? WHERE username = ?")
            .bind(USER_STATUS_DELETED)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
