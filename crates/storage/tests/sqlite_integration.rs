use chrono::Duration;
use prep_core::model::{Difficulty, QuestionId, UserId};
use prep_core::time::fixed_now;
use storage::repository::{
    AttemptRepository, NewAttemptRecord, NewQuestionRecord, QuestionRepository, SkillRepository,
    Storage, StorageError, UserRepository,
};
use storage::seed::{QUESTIONS, SKILLS, seed_catalogue};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn record(text: &str, skill_id: prep_core::model::SkillId) -> NewQuestionRecord {
    NewQuestionRecord {
        text: text.into(),
        skill_id,
        difficulty: Difficulty::Hard,
    }
}

#[tokio::test]
async fn sqlite_round_trips_catalogue_rows() {
    let repo = connect("memdb_catalogue").await;

    let user = repo
        .get_or_create_user("demo_user", "demo@example.com")
        .await
        .unwrap();
    let same = repo
        .get_or_create_user("demo_user", "ignored@example.com")
        .await
        .unwrap();
    assert_eq!(user, same);
    assert_eq!(user.email(), Some("demo@example.com"));

    let skill = repo.get_or_create_skill("System Design").await.unwrap();
    assert_eq!(repo.get_or_create_skill("System Design").await.unwrap(), skill);
    assert!(matches!(
        repo.get_or_create_skill("  ").await,
        Err(StorageError::Invalid(_))
    ));

    let q = repo
        .get_or_create_question(record("Design a URL shortener.", skill.id()))
        .await
        .unwrap();
    let fetched = repo.get_question(q.id()).await.unwrap().expect("question");
    assert_eq!(fetched, q);
    assert_eq!(fetched.difficulty(), Difficulty::Hard);
    assert!(repo.get_question(QuestionId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_orders_questions_by_id_within_skill() {
    let repo = connect("memdb_ordering").await;
    let a = repo.get_or_create_skill("Algorithms").await.unwrap();
    let b = repo.get_or_create_skill("Behavioral").await.unwrap();

    let mut a_ids = Vec::new();
    for i in 0..3 {
        a_ids.push(
            repo.get_or_create_question(record(&format!("A{i}"), a.id()))
                .await
                .unwrap()
                .id(),
        );
        repo.get_or_create_question(record(&format!("B{i}"), b.id()))
            .await
            .unwrap();
    }

    assert_eq!(repo.question_ids_for_skill(a.id()).await.unwrap(), a_ids);
    let first = repo.first_question_in_skill(a.id()).await.unwrap().unwrap();
    assert_eq!(first.id(), a_ids[0]);

    let limited = repo.list_questions(None, 4).await.unwrap();
    assert_eq!(limited.len(), 4);
    let filtered = repo.list_questions(Some(b.id()), 25).await.unwrap();
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|q| q.skill_id() == b.id()));
}

#[tokio::test]
async fn sqlite_attempts_join_skill_and_order_by_recency() {
    let repo = connect("memdb_attempts").await;
    let user = repo.get_or_create_user("ana", "ana@example.com").await.unwrap();
    let skill = repo.get_or_create_skill("Data Structures").await.unwrap();
    let q = repo
        .get_or_create_question(record("Explain a trie.", skill.id()))
        .await
        .unwrap();

    let scores = [Some(50), None, Some(90)];
    for (i, score) in scores.into_iter().enumerate() {
        repo.append_attempt(NewAttemptRecord {
            user_id: user.id(),
            question_id: q.id(),
            score,
            created_at: fixed_now() + Duration::minutes(i64::try_from(i).unwrap()),
        })
        .await
        .unwrap();
    }

    let recent = repo.recent_attempts(user.id(), 50).await.unwrap();
    let got: Vec<Option<i32>> = recent.iter().map(|r| r.attempt.score()).collect();
    assert_eq!(got, [Some(90), None, Some(50)]);
    assert!(recent.iter().all(|r| r.skill == skill));
    assert_eq!(repo.count_attempts(user.id()).await.unwrap(), 3);
    assert!(repo.has_attempt(user.id(), q.id()).await.unwrap());
}

#[tokio::test]
async fn sqlite_rejects_attempt_for_unknown_user() {
    let repo = connect("memdb_fk").await;
    let skill = repo.get_or_create_skill("Algorithms").await.unwrap();
    let q = repo
        .get_or_create_question(record("Binary search?", skill.id()))
        .await
        .unwrap();

    let res = repo
        .append_attempt(NewAttemptRecord {
            user_id: UserId::new(404),
            question_id: q.id(),
            score: Some(10),
            created_at: fixed_now(),
        })
        .await;
    assert!(matches!(res, Err(StorageError::Conflict)));
}

#[tokio::test]
async fn sqlite_seed_is_idempotent() {
    let storage = Storage::sqlite("sqlite:file:memdb_seed?mode=memory&cache=shared")
        .await
        .expect("storage");

    let (user, first) = seed_catalogue(&storage, fixed_now()).await.unwrap();
    assert_eq!(first.attempts_created, QUESTIONS.len());

    let (_, second) = seed_catalogue(&storage, fixed_now()).await.unwrap();
    assert_eq!(second.attempts_created, 0);

    let skills = storage.skills.list_skills().await.unwrap();
    assert_eq!(skills.len(), SKILLS.len());
    assert_eq!(skills[0].name(), "Algorithms");
    assert_eq!(
        storage.attempts.count_attempts(user.id()).await.unwrap(),
        u64::try_from(QUESTIONS.len()).unwrap()
    );
}
