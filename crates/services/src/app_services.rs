use std::sync::Arc;

use prep_core::model::{DEMO_EMAIL, DEMO_USERNAME, Identity};
use storage::repository::{Storage, UserRepository};

use crate::Clock;
use crate::board_service::BoardService;
use crate::error::AppServicesError;
use crate::feedback::{FeedbackGateway, OpenAiFeedbackGateway};
use crate::practice_service::PracticeService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services and resolves the anonymous identity.
#[derive(Clone)]
pub struct AppServices {
    identity: Identity,
    board: Arc<BoardService>,
    practice: Arc<PracticeService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, with the feedback gateway
    /// configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or demo user setup fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let gateway: Arc<dyn FeedbackGateway> = Arc::new(OpenAiFeedbackGateway::from_env());
        Self::from_storage(storage, clock, gateway).await
    }

    /// Build services over an existing `Storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the demo user cannot be resolved.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        gateway: Arc<dyn FeedbackGateway>,
    ) -> Result<Self, AppServicesError> {
        let identity = resolve_anonymous_identity(storage.users.as_ref()).await?;

        let progress = ProgressService::new(
            Arc::clone(&storage.attempts),
            Arc::clone(&storage.questions),
        );
        let board = Arc::new(BoardService::new(
            Arc::clone(&storage.skills),
            Arc::clone(&storage.questions),
            progress.clone(),
        ));
        let practice = Arc::new(PracticeService::new(
            clock,
            Arc::clone(&storage.skills),
            Arc::clone(&storage.questions),
            Arc::clone(&storage.attempts),
            gateway,
        ));

        Ok(Self {
            identity,
            board,
            practice,
            progress: Arc::new(progress),
        })
    }

    /// Identity every anonymous request acts as.
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    #[must_use]
    pub fn board(&self) -> Arc<BoardService> {
        Arc::clone(&self.board)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

async fn resolve_anonymous_identity(
    users: &dyn UserRepository,
) -> Result<Identity, AppServicesError> {
    let demo = users.get_or_create_user(DEMO_USERNAME, DEMO_EMAIL).await?;
    Ok(Identity::anonymous(&demo))
}
