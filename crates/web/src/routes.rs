use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use prep_core::model::QuestionId;
use prep_core::navigation::Destination;
use serde::Deserialize;
use services::{PracticeAction, Submission, SubmissionOutcome};
use tracing::debug;

use crate::error::WebError;
use crate::state::AppState;
use crate::views::{render_home, render_question};
use crate::vm::{map_home, map_question, question_href};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/question/:id/", get(question).post(submit))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    skill: Option<String>,
}

/// Question form fields; all optional, unknown fields ignored.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionForm {
    action: Option<String>,
    notes: Option<String>,
    score: Option<String>,
}

impl From<QuestionForm> for Submission {
    fn from(form: QuestionForm) -> Self {
        Submission {
            action: PracticeAction::from_form(form.action.as_deref()),
            notes: form.notes,
            score: form.score,
        }
    }
}

async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, WebError> {
    let services = state.services();
    let board = services
        .board()
        .home(services.identity(), query.skill.as_deref())
        .await?;
    Ok(Html(render_home(map_home(&board))))
}

async fn question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_question_id(&raw_id)?;
    let page = state.services().practice().load_question(id).await?;
    Ok(Html(render_question(map_question(&page, "", None))))
}

async fn submit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<QuestionForm>,
) -> Result<Response, WebError> {
    let id = parse_question_id(&raw_id)?;
    let services = state.services();
    let outcome = services
        .practice()
        .submit(services.identity(), id, form.into())
        .await?;

    let response = match outcome {
        SubmissionOutcome::Feedback {
            page,
            notes,
            notice,
        } => Html(render_question(map_question(&page, &notes, Some(&notice)))).into_response(),
        SubmissionOutcome::Advanced { destination, .. } => {
            let location = match destination {
                Destination::Question(next) => question_href(next),
                Destination::Board => "/".to_owned(),
            };
            debug!(%location, "redirecting after submission");
            Redirect::to(&location).into_response()
        }
    };
    Ok(response)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> WebError {
    WebError::NotFound
}

fn parse_question_id(raw: &str) -> Result<QuestionId, WebError> {
    raw.parse().map_err(|_| WebError::NotFound)
}
