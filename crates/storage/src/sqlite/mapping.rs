use prep_core::model::{
    Attempt, AttemptId, Difficulty, Question, QuestionId, Skill, SkillId, User, UserId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{RecentAttempt, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps driver errors, surfacing foreign key violations as `Conflict`.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

pub(crate) fn skill_id_from_i64(v: i64) -> Result<SkillId, StorageError> {
    Ok(SkillId::new(i64_to_u64("skill_id", v)?))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn attempt_id_from_i64(v: i64) -> Result<AttemptId, StorageError> {
    Ok(AttemptId::new(i64_to_u64("attempt_id", v)?))
}

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<User, StorageError> {
    Ok(User::new(
        user_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("username").map_err(ser)?,
        row.try_get::<Option<String>, _>("email").map_err(ser)?,
    ))
}

pub(crate) fn map_skill_row(row: &SqliteRow) -> Result<Skill, StorageError> {
    Skill::new(
        skill_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let difficulty: Difficulty = row
        .try_get::<String, _>("difficulty")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    Question::new(
        question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("question_text").map_err(ser)?,
        skill_id_from_i64(row.try_get::<i64, _>("skill_id").map_err(ser)?)?,
        difficulty,
    )
    .map_err(ser)
}

/// Expects the attempt columns plus `skill_name` from a join on skills.
pub(crate) fn map_recent_attempt_row(row: &SqliteRow) -> Result<RecentAttempt, StorageError> {
    let score = row
        .try_get::<Option<i64>, _>("score")
        .map_err(ser)?
        .map(|s| {
            i32::try_from(s).map_err(|_| StorageError::Serialization(format!("invalid score: {s}")))
        })
        .transpose()?;

    let attempt = Attempt::from_persisted(
        attempt_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        question_id_from_i64(row.try_get::<i64, _>("question_id").map_err(ser)?)?,
        score,
        row.try_get("created_at").map_err(ser)?,
    );

    let skill = Skill::new(
        skill_id_from_i64(row.try_get::<i64, _>("skill_id").map_err(ser)?)?,
        row.try_get::<String, _>("skill_name").map_err(ser)?,
    )
    .map_err(ser)?;

    Ok(RecentAttempt { attempt, skill })
}
