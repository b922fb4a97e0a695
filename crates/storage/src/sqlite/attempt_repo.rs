use prep_core::model::{AttemptId, QuestionId, UserId};

use super::SqliteRepository;
use super::mapping::{attempt_id_from_i64, db_err, id_i64, map_recent_attempt_row};
use crate::repository::{AttemptRepository, NewAttemptRecord, RecentAttempt, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempt(&self, record: NewAttemptRecord) -> Result<AttemptId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO attempts (user_id, question_id, score, created_at)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(id_i64("user_id", record.user_id.value())?)
        .bind(id_i64("question_id", record.question_id.value())?)
        .bind(record.score.map(i64::from))
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        attempt_id_from_i64(res.last_insert_rowid())
    }

    async fn has_attempt(&self, user: UserId, question: QuestionId) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT 1 FROM attempts WHERE user_id = ?1 AND question_id = ?2")
            .bind(id_i64("user_id", user.value())?)
            .bind(id_i64("question_id", question.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.is_some())
    }

    async fn recent_attempts(
        &self,
        user: UserId,
        limit: u32,
    ) -> Result<Vec<RecentAttempt>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    a.id, a.user_id, a.question_id, a.score, a.created_at,
                    s.id AS skill_id, s.name AS skill_name
                FROM attempts a
                JOIN questions q ON q.id = a.question_id
                JOIN skills s ON s.id = q.skill_id
                WHERE a.user_id = ?1
                ORDER BY a.created_at DESC, a.id DESC
                LIMIT ?2
            ",
        )
        .bind(id_i64("user_id", user.value())?)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_recent_attempt_row).collect()
    }

    async fn count_attempts(&self, user: UserId) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attempts WHERE user_id = ?1")
            .bind(id_i64("user_id", user.value())?)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        u64::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }
}
