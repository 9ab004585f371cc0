//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Each handler turns one user action into a `Command` for the `LessonPlanner`
//! and maps the `Outcome` (or `LessonError`) onto an HTTP response.

use crate::web::protocol::{
    AnalyticsResponse, DeleteLessonQuery, DeletedLessonResponse, ErrorResponse,
    GenerateLessonRequest, GenerateLessonResponse, HealthResponse, LessonView,
    ProblematicLessonView, SaveLessonRequest, SavedLessonResponse, ScoresUpdatedResponse,
    UpdateScoresRequest,
};
use crate::web::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use lesson_planner_core::{export, Command, LessonError, LessonRequest, Outcome};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_lesson_handler,
        list_lessons_handler,
        save_lesson_handler,
        update_scores_handler,
        delete_lesson_handler,
        export_lesson_handler,
        analytics_handler,
        health_handler,
    ),
    components(
        schemas(
            GenerateLessonRequest,
            GenerateLessonResponse,
            SaveLessonRequest,
            SavedLessonResponse,
            UpdateScoresRequest,
            ScoresUpdatedResponse,
            DeletedLessonResponse,
            LessonView,
            AnalyticsResponse,
            ProblematicLessonView,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Lesson Planner API", description = "Lesson plan generation, lesson archive and score analytics.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn unexpected_outcome(outcome: Outcome) -> HandlerError {
    error!("Unexpected planner outcome: {:?}", outcome);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Unexpected planner outcome")),
    )
}

/// Wraps an extractor rejection in the JSON error body every other failure uses.
fn rejected(status: StatusCode, reason: String) -> HandlerError {
    warn!("Malformed request: {}", reason);
    (status, Json(ErrorResponse::new(reason)))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|r| rejected(r.status(), r.body_text()))
}

fn lesson_index(path: Result<Path<usize>, PathRejection>) -> Result<usize, HandlerError> {
    path.map(|Path(index)| index)
        .map_err(|r| rejected(r.status(), r.body_text()))
}

/// Maps a core error onto a status code and a user-facing message.
pub fn lesson_error(err: LessonError) -> HandlerError {
    let status = match &err {
        LessonError::InvalidScoreList
        | LessonError::InvalidRequest(_)
        | LessonError::MissingContent => StatusCode::UNPROCESSABLE_ENTITY,
        LessonError::ConfirmationRequired => StatusCode::BAD_REQUEST,
        LessonError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
        LessonError::GatewayFailure(_) => StatusCode::BAD_GATEWAY,
        LessonError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    (status, Json(ErrorResponse::new(err.to_string())))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a lesson plan and a 10-question quiz.
///
/// The generated Markdown is returned as-is and is not saved.
#[utoipa::path(
    post,
    path = "/api/generate-lesson",
    request_body = GenerateLessonRequest,
    responses(
        (status = 200, description = "Lesson generated", body = GenerateLessonResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Invalid lesson parameters", body = ErrorResponse),
        (status = 502, description = "The text-generation service failed", body = ErrorResponse)
    )
)]
pub async fn generate_lesson_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateLessonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request = LessonRequest::from(json_body(payload)?);
    let theme = request.topic.clone();

    match state.planner.dispatch(Command::Generate(request)).await {
        Ok(Outcome::Generated { content }) => Ok(Json(GenerateLessonResponse {
            success: true,
            content,
            theme,
        })),
        Ok(other) => Err(unexpected_outcome(other)),
        Err(e) => Err(lesson_error(e)),
    }
}

/// List every saved lesson in archive order.
#[utoipa::path(
    get,
    path = "/api/lessons",
    responses(
        (status = 200, description = "Saved lessons", body = [LessonView])
    )
)]
pub async fn list_lessons_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let archive = state.planner.archive().await;
    let lessons: Vec<LessonView> = archive
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| LessonView::new(index, record))
        .collect();
    Json(lessons)
}

/// Save a generated lesson to the archive.
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = SaveLessonRequest,
    responses(
        (status = 201, description = "Lesson saved", body = SavedLessonResponse),
        (status = 422, description = "No generated content to save", body = ErrorResponse),
        (status = 500, description = "The archive could not be written", body = ErrorResponse)
    )
)]
pub async fn save_lesson_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveLessonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let req = json_body(payload)?;
    match state.planner.dispatch(Command::Save(req.into())).await {
        Ok(Outcome::Saved { index, record }) => Ok((
            StatusCode::CREATED,
            Json(SavedLessonResponse {
                index,
                lesson: LessonView::new(index, &record),
            }),
        )),
        Ok(other) => Err(unexpected_outcome(other)),
        Err(e) => Err(lesson_error(e)),
    }
}

/// Enter the score list of a lesson and recompute its metrics.
#[utoipa::path(
    put,
    path = "/api/lessons/{index}/scores",
    request_body = UpdateScoresRequest,
    params(
        ("index" = usize, Path, description = "Position of the lesson in the archive.")
    ),
    responses(
        (status = 200, description = "Scores saved", body = ScoresUpdatedResponse),
        (status = 404, description = "No lesson at this position", body = ErrorResponse),
        (status = 422, description = "No valid score in the list", body = ErrorResponse)
    )
)]
pub async fn update_scores_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<usize>, PathRejection>,
    payload: Result<Json<UpdateScoresRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let index = lesson_index(path)?;
    let req = json_body(payload)?;
    let command = Command::UpdateScores {
        index,
        scores_text: req.scores_text,
    };
    match state.planner.dispatch(command).await {
        Ok(Outcome::ScoresUpdated {
            index,
            theme,
            metrics,
        }) => Ok(Json(ScoresUpdatedResponse::new(index, theme, metrics))),
        Ok(other) => Err(unexpected_outcome(other)),
        Err(e) => Err(lesson_error(e)),
    }
}

/// Delete a lesson. Later lessons move up one position.
#[utoipa::path(
    delete,
    path = "/api/lessons/{index}",
    params(
        ("index" = usize, Path, description = "Position of the lesson in the archive."),
        DeleteLessonQuery
    ),
    responses(
        (status = 200, description = "Lesson deleted", body = DeletedLessonResponse),
        (status = 400, description = "Deletion was not confirmed", body = ErrorResponse),
        (status = 404, description = "No lesson at this position", body = ErrorResponse)
    )
)]
pub async fn delete_lesson_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<usize>, PathRejection>,
    query: Result<Query<DeleteLessonQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let index = lesson_index(path)?;
    let Query(query) = query.map_err(|r| rejected(r.status(), r.body_text()))?;
    let command = Command::Delete {
        index,
        confirmed: query.confirm,
    };
    match state.planner.dispatch(command).await {
        Ok(Outcome::Deleted { record }) => Ok(Json(DeletedLessonResponse {
            lesson: LessonView::new(index, &record),
        })),
        Ok(other) => Err(unexpected_outcome(other)),
        Err(e) => Err(lesson_error(e)),
    }
}

/// Download a saved lesson as a plain-text Word document.
#[utoipa::path(
    get,
    path = "/api/lessons/{index}/export",
    params(
        ("index" = usize, Path, description = "Position of the lesson in the archive.")
    ),
    responses(
        (status = 200, description = "Plain-text lesson plan", body = String, content_type = "application/msword"),
        (status = 404, description = "No lesson at this position", body = ErrorResponse)
    )
)]
pub async fn export_lesson_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<usize>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let index = lesson_index(path)?;
    let archive = state.planner.archive().await;
    let record = archive.get(index).map_err(lesson_error)?;

    let body = export::render_plain_text(&record.theme, &record.generated_content);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::file_name(&record.theme)
    );
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/msword; charset=utf-8".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Fleet-wide score analytics over every saved lesson.
#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsResponse)
    )
)]
pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    match state.planner.dispatch(Command::Summarize).await {
        Ok(Outcome::Summary(summary)) => Ok(Json(AnalyticsResponse::from(&summary))),
        Ok(other) => Err(unexpected_outcome(other)),
        Err(e) => Err(lesson_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.config.lesson_model.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_planner_core::PortError;

    #[test]
    fn error_statuses() {
        let cases = [
            (LessonError::InvalidScoreList, StatusCode::UNPROCESSABLE_ENTITY),
            (LessonError::MissingContent, StatusCode::UNPROCESSABLE_ENTITY),
            (LessonError::ConfirmationRequired, StatusCode::BAD_REQUEST),
            (
                LessonError::IndexOutOfRange { index: 2, len: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                LessonError::GatewayFailure("quota".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                LessonError::Storage(PortError::Unexpected("disk".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, Json(body)) = lesson_error(err);
            assert_eq!(status, expected);
            assert!(!body.success);
            assert!(!body.error.is_empty());
        }
    }
}
