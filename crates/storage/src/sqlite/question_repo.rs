use prep_core::model::{Question, QuestionId, SkillId};

use super::SqliteRepository;
use super::mapping::{db_err, id_i64, map_question_row, question_id_from_i64};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn get_or_create_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<Question, StorageError> {
        let skill_id = id_i64("skill_id", record.skill_id.value())?;

        let existing = sqlx::query(
            r"
            SELECT id, question_text, skill_id, difficulty
            FROM questions
            WHERE question_text = ?1 AND skill_id = ?2
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(&record.text)
        .bind(skill_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        if let Some(row) = existing {
            return map_question_row(&row);
        }

        // Validate before insert so a blank text never reaches the table.
        Question::new(QuestionId::new(0), record.text.as_str(), record.skill_id, record.difficulty)
            .map_err(|e| StorageError::Invalid(e.to_string()))?;

        let res = sqlx::query(
            r"
            INSERT INTO questions (question_text, skill_id, difficulty)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(&record.text)
        .bind(skill_id)
        .bind(record.difficulty.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Question::new(
            question_id_from_i64(res.last_insert_rowid())?,
            record.text,
            record.skill_id,
            record.difficulty,
        )
        .map_err(|e| StorageError::Invalid(e.to_string()))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question_text, skill_id, difficulty
            FROM questions WHERE id = ?1
            ",
        )
        .bind(id_i64("question_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(
        &self,
        skill: Option<SkillId>,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError> {
        let skill = skill
            .map(|s| id_i64("skill_id", s.value()))
            .transpose()?;

        let rows = sqlx::query(
            r"
            SELECT id, question_text, skill_id, difficulty
            FROM questions
            WHERE ?1 IS NULL OR skill_id = ?1
            ORDER BY id ASC
            LIMIT ?2
            ",
        )
        .bind(skill)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn question_ids_for_skill(
        &self,
        skill: SkillId,
    ) -> Result<Vec<QuestionId>, StorageError> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM questions WHERE skill_id = ?1 ORDER BY id ASC")
                .bind(id_i64("skill_id", skill.value())?)
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;

        ids.into_iter().map(question_id_from_i64).collect()
    }

    async fn first_question_in_skill(
        &self,
        skill: SkillId,
    ) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question_text, skill_id, difficulty
            FROM questions
            WHERE skill_id = ?1
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(id_i64("skill_id", skill.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_question_row).transpose()
    }
}
