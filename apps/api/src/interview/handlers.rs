//! Axum route handlers for the Interview API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::service::CreateInterviewRequest;
use crate::interview::view::InterviewView;
use crate::state::AppState;

/// Longest answer accepted, in characters.
const MAX_ANSWER_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

/// POST /api/v1/interviews
///
/// The body is optional. Without a JSON body the configured defaults apply; a body that
/// is present but does not parse is rejected.
pub async fn handle_create(
    State(state): State<AppState>,
    body: Result<Json<CreateInterviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InterviewView>), AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateInterviewRequest::default(),
        Err(rejection) => {
            return Err(AppError::Validation(format!(
                "Invalid interview settings: {}",
                rejection.body_text()
            )))
        }
    };
    let view = state.interviews.create(request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    Ok(Json(state.interviews.get_view(id).await?))
}

/// POST /api/v1/interviews/:id/advance
///
/// Runs one step of the interview. Also the retry path after a gateway failure.
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    Ok(Json(state.interviews.advance(id).await?))
}

/// POST /api/v1/interviews/:id/answer
///
/// Records the answer only. The client calls `advance` to have it evaluated.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<InterviewView>, AppError> {
    if request.answer.chars().count() > MAX_ANSWER_CHARS {
        return Err(AppError::Validation(format!(
            "answer must be at most {MAX_ANSWER_CHARS} characters"
        )));
    }
    Ok(Json(
        state.interviews.submit_answer(id, &request.answer).await?,
    ))
}

/// GET /api/v1/interviews/:id/report
///
/// Markdown export of the final report.
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let markdown = state.interviews.export_report(id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.interviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
