use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use services::{BoardError, PracticeError};

use crate::views::render_error;

/// Errors a handler can surface; each maps to an HTML error page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WebError {
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Practice(#[from] PracticeError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl WebError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound | WebError::Practice(PracticeError::QuestionNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            match &self {
                WebError::Practice(PracticeError::QuestionNotFound(id)) => {
                    format!("Question {id} does not exist.")
                }
                _ => "That page does not exist.".to_owned(),
            }
        } else {
            tracing::error!(error = %self, "request failed");
            "Something went wrong on our side.".to_owned()
        };

        (status, Html(render_error(status.as_u16(), message))).into_response()
    }
}
