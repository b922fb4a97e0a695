#![forbid(unsafe_code)]

pub mod app_services;
pub mod board_service;
pub mod error;
pub mod feedback;
pub mod practice_service;
pub mod progress_service;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use board_service::{BoardQuestion, BoardService, HomeBoard};
pub use error::{AppServicesError, BoardError, FeedbackError, PracticeError};
pub use feedback::{
    DisabledFeedbackGateway, FeedbackConfig, FeedbackGateway, FeedbackRequest,
    OpenAiFeedbackGateway,
};
pub use practice_service::{
    FeedbackNotice, PracticeAction, PracticeService, QuestionPage, Submission, SubmissionOutcome,
};
pub use progress_service::{ProgressReport, ProgressService};
