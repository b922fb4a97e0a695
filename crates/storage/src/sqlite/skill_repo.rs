use prep_core::model::{Skill, SkillId};

use super::SqliteRepository;
use super::mapping::{db_err, id_i64, map_skill_row, skill_id_from_i64};
use crate::repository::{SkillRepository, StorageError};

#[async_trait::async_trait]
impl SkillRepository for SqliteRepository {
    async fn get_or_create_skill(&self, name: &str) -> Result<Skill, StorageError> {
        let name = name.trim();
        // Validate before touching the table; the id is replaced below.
        Skill::new(SkillId::new(0), name).map_err(|e| StorageError::Invalid(e.to_string()))?;

        let existing = sqlx::query(
            r"
            SELECT id, name FROM skills
            WHERE name = ?1
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        if let Some(row) = existing {
            return map_skill_row(&row);
        }

        let res = sqlx::query("INSERT INTO skills (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Skill::new(skill_id_from_i64(res.last_insert_rowid())?, name)
            .map_err(|e| StorageError::Invalid(e.to_string()))
    }

    async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, StorageError> {
        let row = sqlx::query("SELECT id, name FROM skills WHERE id = ?1")
            .bind(id_i64("skill_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_skill_row).transpose()
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM skills ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(map_skill_row).collect()
    }
}
