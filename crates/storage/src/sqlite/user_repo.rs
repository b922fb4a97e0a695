use prep_core::model::{User, UserId};

use super::SqliteRepository;
use super::mapping::{db_err, id_i64, map_user_row};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn get_or_create_user(&self, username: &str, email: &str) -> Result<User, StorageError> {
        sqlx::query(
            r"
            INSERT INTO users (username, email)
            VALUES (?1, ?2)
            ON CONFLICT(username) DO NOTHING
            ",
        )
        .bind(username)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let row = sqlx::query("SELECT id, username, email FROM users WHERE username = ?1")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        map_user_row(&row)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT id, username, email FROM users WHERE id = ?1")
            .bind(id_i64("user_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_user_row).transpose()
    }
}
