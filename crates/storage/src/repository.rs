use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{
    Attempt, AttemptId, Difficulty, Question, QuestionId, Skill, SkillId, User, UserId,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("invalid record: {0}")]
    Invalid(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a question; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionRecord {
    pub text: String,
    pub skill_id: SkillId,
    pub difficulty: Difficulty,
}

/// Insert shape for an attempt; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttemptRecord {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// An attempt joined with the skill of its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentAttempt {
    pub attempt: Attempt,
    pub skill: Skill,
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user with `username`, creating it with `email` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup or insert fails.
    async fn get_or_create_user(&self, username: &str, email: &str) -> Result<User, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;
}

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Fetch the lowest-id skill named `name`, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Invalid` for an empty name, or backend errors.
    async fn get_or_create_skill(&self, name: &str) -> Result<Skill, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, StorageError>;

    /// All skills ordered by name, then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_skills(&self) -> Result<Vec<Skill>, StorageError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch the question with the same text and skill, creating it otherwise.
    ///
    /// The difficulty of an existing question is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the skill does not exist.
    async fn get_or_create_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<Question, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Questions ordered by id, optionally restricted to one skill.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_questions(
        &self,
        skill: Option<SkillId>,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError>;

    /// Ids of every question in `skill`, ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn question_ids_for_skill(&self, skill: SkillId)
    -> Result<Vec<QuestionId>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn first_question_in_skill(
        &self,
        skill: SkillId,
    ) -> Result<Option<Question>, StorageError>;
}

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append an attempt. Attempts are never updated or deleted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the user or question does not exist.
    async fn append_attempt(&self, record: NewAttemptRecord) -> Result<AttemptId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn has_attempt(&self, user: UserId, question: QuestionId) -> Result<bool, StorageError>;

    /// The newest `limit` attempts of `user` (by `created_at`, then id),
    /// each joined with its question's skill.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn recent_attempts(
        &self,
        user: UserId,
        limit: u32,
    ) -> Result<Vec<RecentAttempt>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_attempts(&self, user: UserId) -> Result<u64, StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    skills: Vec<Skill>,
    questions: Vec<Question>,
    attempts: Vec<Attempt>,
}

fn next_id(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX - 1) + 1
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Ids are assigned sequentially from 1, like SQLite rowids.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_or_create_user(&self, username: &str, email: &str) -> Result<User, StorageError> {
        let mut guard = self.lock()?;
        if let Some(user) = guard.users.iter().find(|u| u.username() == username) {
            return Ok(user.clone());
        }
        let user = User::new(
            UserId::new(next_id(guard.users.len())),
            username,
            Some(email.to_owned()),
        );
        guard.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.users.iter().find(|u| u.id() == id).cloned())
    }
}

#[async_trait]
impl SkillRepository for InMemoryRepository {
    async fn get_or_create_skill(&self, name: &str) -> Result<Skill, StorageError> {
        let mut guard = self.lock()?;
        let name = name.trim();
        if let Some(skill) = guard.skills.iter().find(|s| s.name() == name) {
            return Ok(skill.clone());
        }
        let skill = Skill::new(SkillId::new(next_id(guard.skills.len())), name)
            .map_err(|e| StorageError::Invalid(e.to_string()))?;
        guard.skills.push(skill.clone());
        Ok(skill)
    }

    async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.skills.iter().find(|s| s.id() == id).cloned())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, StorageError> {
        let guard = self.lock()?;
        let mut skills = guard.skills.clone();
        skills.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(skills)
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn get_or_create_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<Question, StorageError> {
        let mut guard = self.lock()?;
        if !guard.skills.iter().any(|s| s.id() == record.skill_id) {
            return Err(StorageError::Conflict);
        }
        if let Some(existing) = guard
            .questions
            .iter()
            .find(|q| q.text() == record.text && q.skill_id() == record.skill_id)
        {
            return Ok(existing.clone());
        }
        let question = Question::new(
            QuestionId::new(next_id(guard.questions.len())),
            record.text,
            record.skill_id,
            record.difficulty,
        )
        .map_err(|e| StorageError::Invalid(e.to_string()))?;
        guard.questions.push(question.clone());
        Ok(question)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.questions.iter().find(|q| q.id() == id).cloned())
    }

    async fn list_questions(
        &self,
        skill: Option<SkillId>,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self.lock()?;
        let mut questions: Vec<Question> = guard
            .questions
            .iter()
            .filter(|q| skill.is_none_or(|s| q.skill_id() == s))
            .cloned()
            .collect();
        questions.sort_by_key(Question::id);
        questions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(questions)
    }

    async fn question_ids_for_skill(
        &self,
        skill: SkillId,
    ) -> Result<Vec<QuestionId>, StorageError> {
        let guard = self.lock()?;
        let mut ids: Vec<QuestionId> = guard
            .questions
            .iter()
            .filter(|q| q.skill_id() == skill)
            .map(Question::id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn first_question_in_skill(
        &self,
        skill: SkillId,
    ) -> Result<Option<Question>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .questions
            .iter()
            .filter(|q| q.skill_id() == skill)
            .min_by_key(|q| q.id())
            .cloned())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(&self, record: NewAttemptRecord) -> Result<AttemptId, StorageError> {
        let mut guard = self.lock()?;
        let user_known = guard.users.iter().any(|u| u.id() == record.user_id);
        let question_known = guard.questions.iter().any(|q| q.id() == record.question_id);
        if !user_known || !question_known {
            return Err(StorageError::Conflict);
        }
        let id = AttemptId::new(next_id(guard.attempts.len()));
        guard.attempts.push(Attempt::from_persisted(
            id,
            record.user_id,
            record.question_id,
            record.score,
            record.created_at,
        ));
        Ok(id)
    }

    async fn has_attempt(&self, user: UserId, question: QuestionId) -> Result<bool, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .attempts
            .iter()
            .any(|a| a.user_id() == user && a.question_id() == question))
    }

    async fn recent_attempts(
        &self,
        user: UserId,
        limit: u32,
    ) -> Result<Vec<RecentAttempt>, StorageError> {
        let guard = self.lock()?;
        let mut attempts: Vec<&Attempt> =
            guard.attempts.iter().filter(|a| a.user_id() == user).collect();
        attempts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });
        attempts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let mut out = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            let skill = guard
                .questions
                .iter()
                .find(|q| q.id() == attempt.question_id())
                .and_then(|q| guard.skills.iter().find(|s| s.id() == q.skill_id()))
                .cloned()
                .ok_or(StorageError::NotFound)?;
            out.push(RecentAttempt {
                attempt: attempt.clone(),
                skill,
            });
        }
        Ok(out)
    }

    async fn count_attempts(&self, user: UserId) -> Result<u64, StorageError> {
        let guard = self.lock()?;
        let count = guard.attempts.iter().filter(|a| a.user_id() == user).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            users: Arc::new(repo.clone()),
            skills: Arc::new(repo.clone()),
            questions: Arc::new(repo.clone()),
            attempts: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::time::fixed_now;

    async fn seeded() -> (InMemoryRepository, User, Skill, Skill) {
        let repo = InMemoryRepository::new();
        let user = repo.get_or_create_user("ana", "ana@example.com").await.unwrap();
        let algo = repo.get_or_create_skill("Algorithms").await.unwrap();
        let design = repo.get_or_create_skill("System Design").await.unwrap();
        (repo, user, algo, design)
    }

    fn question(text: &str, skill: &Skill) -> NewQuestionRecord {
        NewQuestionRecord {
            text: text.into(),
            skill_id: skill.id(),
            difficulty: Difficulty::Medium,
        }
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let (repo, user, algo, _) = seeded().await;
        let again = repo.get_or_create_user("ana", "other@example.com").await.unwrap();
        assert_eq!(again, user);
        assert_eq!(repo.get_or_create_skill(" Algorithms ").await.unwrap(), algo);

        let q1 = repo.get_or_create_question(question("Q", &algo)).await.unwrap();
        let mut hard = question("Q", &algo);
        hard.difficulty = Difficulty::Hard;
        let q2 = repo.get_or_create_question(hard).await.unwrap();
        assert_eq!(q1, q2);
        assert_eq!(q2.difficulty(), Difficulty::Medium);
    }

    #[tokio::test]
    async fn skills_list_by_name() {
        let repo = InMemoryRepository::new();
        repo.get_or_create_skill("Zeta").await.unwrap();
        repo.get_or_create_skill("Alpha").await.unwrap();
        let names: Vec<String> = repo
            .list_skills()
            .await
            .unwrap()
            .iter()
            .map(|s| s.name().to_owned())
            .collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn question_listing_filters_and_limits() {
        let (repo, _, algo, design) = seeded().await;
        for i in 0..4 {
            repo.get_or_create_question(question(&format!("A{i}"), &algo))
                .await
                .unwrap();
            repo.get_or_create_question(question(&format!("D{i}"), &design))
                .await
                .unwrap();
        }
        let all = repo.list_questions(None, 5).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].id() < w[1].id()));

        let only_design = repo.list_questions(Some(design.id()), 25).await.unwrap();
        assert_eq!(only_design.len(), 4);
        assert!(only_design.iter().all(|q| q.skill_id() == design.id()));

        let ids = repo.question_ids_for_skill(algo.id()).await.unwrap();
        let first = repo.first_question_in_skill(algo.id()).await.unwrap().unwrap();
        assert_eq!(ids.first(), Some(&first.id()));
    }

    #[tokio::test]
    async fn attempts_require_known_user_and_question() {
        let (repo, user, algo, _) = seeded().await;
        let q = repo.get_or_create_question(question("Q", &algo)).await.unwrap();

        let orphan = NewAttemptRecord {
            user_id: UserId::new(99),
            question_id: q.id(),
            score: Some(10),
            created_at: fixed_now(),
        };
        assert!(matches!(
            repo.append_attempt(orphan).await,
            Err(StorageError::Conflict)
        ));

        let ok = NewAttemptRecord {
            user_id: user.id(),
            question_id: q.id(),
            score: Some(10),
            created_at: fixed_now(),
        };
        repo.append_attempt(ok).await.unwrap();
        assert!(repo.has_attempt(user.id(), q.id()).await.unwrap());
        assert_eq!(repo.count_attempts(user.id()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn recent_attempts_are_newest_first_and_bounded() {
        let (repo, user, algo, design) = seeded().await;
        let qa = repo.get_or_create_question(question("QA", &algo)).await.unwrap();
        let qd = repo.get_or_create_question(question("QD", &design)).await.unwrap();

        for i in 0..5 {
            let question_id = if i % 2 == 0 { qa.id() } else { qd.id() };
            repo.append_attempt(NewAttemptRecord {
                user_id: user.id(),
                question_id,
                score: Some(i * 10),
                created_at: fixed_now() + Duration::minutes(i64::from(i)),
            })
            .await
            .unwrap();
        }

        let recent = repo.recent_attempts(user.id(), 3).await.unwrap();
        let scores: Vec<Option<i32>> = recent.iter().map(|r| r.attempt.score()).collect();
        assert_eq!(scores, [Some(40), Some(30), Some(20)]);
        assert_eq!(recent[0].skill, algo);
        assert_eq!(recent[1].skill, design);
    }
}
