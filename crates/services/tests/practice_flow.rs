use std::sync::Arc;

use prep_core::navigation::Destination;
use prep_core::time::fixed_now;
use services::{
    AppServices, Clock, DisabledFeedbackGateway, FeedbackNotice, PracticeAction, Submission,
    SubmissionOutcome,
};
use storage::repository::Storage;
use storage::seed::{QUESTIONS, seed_catalogue};

async fn seeded_services() -> (Storage, AppServices) {
    let storage = Storage::in_memory();
    seed_catalogue(&storage, fixed_now()).await.unwrap();
    let services = AppServices::from_storage(
        storage.clone(),
        Clock::fixed(fixed_now() + chrono::Duration::hours(1)),
        Arc::new(DisabledFeedbackGateway),
    )
    .await
    .unwrap();
    (storage, services)
}

#[tokio::test]
async fn identity_resolves_to_seeded_demo_user() {
    let (storage, services) = seeded_services().await;
    let identity = services.identity();
    assert!(identity.is_anonymous());

    let user = storage.users.get_user(identity.user_id()).await.unwrap().unwrap();
    assert_eq!(user.username(), "demo_user");
}

#[tokio::test]
async fn board_lists_limited_questions_and_weakest_recommendation() {
    let (_storage, services) = seeded_services().await;
    let board = services.board().home(services.identity(), None).await.unwrap();

    assert_eq!(board.skills.len(), 4);
    assert_eq!(board.skills[0].name(), "Algorithms");
    assert!(board.active_skill.is_none());
    assert_eq!(board.questions.len(), 25);
    assert_eq!(board.first_question, Some(board.questions[0].question.id()));

    let summary = &board.progress.summary;
    assert_eq!(summary.total_attempts, 48);
    // Seeded scores rise with catalogue position.
    assert_eq!(summary.weakest_skill().unwrap().name(), "Data Structures");
    assert_eq!(summary.best_skill().unwrap().name(), "System Design");

    let recommended = board.progress.recommendation.as_ref().unwrap();
    assert_eq!(recommended.text(), QUESTIONS[0].0);
}

#[tokio::test]
async fn board_filters_by_skill_param_and_ignores_garbage() {
    let (_storage, services) = seeded_services().await;
    let board = services.board();
    let identity = services.identity();

    let all = board.home(identity, None).await.unwrap();
    let design = all
        .skills
        .iter()
        .find(|s| s.name() == "System Design")
        .unwrap()
        .clone();

    let filtered = board
        .home(identity, Some(&design.id().to_string()))
        .await
        .unwrap();
    assert_eq!(filtered.active_skill.as_ref(), Some(&design));
    assert!(!filtered.questions.is_empty());
    assert!(
        filtered
            .questions
            .iter()
            .all(|row| row.question.skill_id() == design.id() && row.skill_name == "System Design")
    );

    for raw in ["", "abc", "9999"] {
        let unfiltered = board.home(identity, Some(raw)).await.unwrap();
        assert!(unfiltered.active_skill.is_none(), "param {raw:?}");
        assert_eq!(unfiltered.questions.len(), 25);
    }
}

#[tokio::test]
async fn scored_advance_counts_towards_progress() {
    let (_storage, services) = seeded_services().await;
    let identity = services.identity();
    let before = services.progress().report(identity).await.unwrap();
    let first = before.recommendation.clone().unwrap();

    let outcome = services
        .practice()
        .submit(
            identity,
            first.id(),
            Submission {
                action: PracticeAction::Advance,
                notes: None,
                score: Some(" 100 ".into()),
            },
        )
        .await
        .unwrap();
    let SubmissionOutcome::Advanced { attempt, destination } = outcome else {
        panic!("expected advance");
    };
    assert!(attempt.is_some());
    assert!(matches!(destination, Destination::Question(next) if next > first.id()));

    let after = services.progress().report(identity).await.unwrap();
    assert_eq!(after.summary.total_attempts, 49);
    // 100 is below the seeded mean of 305.
    assert!(after.summary.average_score < before.summary.average_score);
    assert_eq!(after.weakest_skill(), before.weakest_skill());
}

#[tokio::test]
async fn feedback_without_gateway_is_informational() {
    let (_storage, services) = seeded_services().await;
    let identity = services.identity();
    let page_id = services
        .board()
        .home(identity, None)
        .await
        .unwrap()
        .first_question
        .unwrap();

    let outcome = services
        .practice()
        .submit(
            identity,
            page_id,
            Submission {
                action: PracticeAction::from_form(Some("ai")),
                notes: Some("Use a hash map.".into()),
                score: None,
            },
        )
        .await
        .unwrap();

    let SubmissionOutcome::Feedback { notice, notes, .. } = outcome else {
        panic!("expected feedback");
    };
    assert_eq!(notice, FeedbackNotice::NotConfigured);
    assert_eq!(notes, "Use a hash map.");
    assert_eq!(
        services.progress().report(identity).await.unwrap().summary.total_attempts,
        48
    );
}
