use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{AnswerId, QuestionId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Answer, CreateAnswerDto, PaginatedAnswersResponse, UpdateAnswerDto};
use super::service::AnswerService;

/// Answer a student question
#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = CreateAnswerDto,
    responses(
        (status = 201, description = "Answer created", body = Answer),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Question not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Answers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_answer(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateAnswerDto>,
) -> Result<(StatusCode, Json<Answer>), AppError> {
    let answer = AnswerService::create_answer(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

#[utoipa::path(
    get,
    path = "/api/answers",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of answers", body = PaginatedAnswersResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Answers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_answers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedAnswersResponse>, AppError> {
    let answers = AnswerService::get_answers(&state.db, pagination).await?;
    Ok(Json(answers))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}/answers",
    params(
        ("id" = Uuid, Path, description = "Question ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Answers to the question", body = PaginatedAnswersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Question not found")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_question_answers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<QuestionId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedAnswersResponse>, AppError> {
    let answers = AnswerService::get_answers_by_question(&state.db, id, pagination).await?;
    Ok(Json(answers))
}

#[utoipa::path(
    get,
    path = "/api/answers/{id}",
    params(("id" = Uuid, Path, description = "Answer ID")),
    responses(
        (status = 200, description = "Answer details", body = Answer),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Answer not found")
    ),
    tag = "Answers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_answer_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<AnswerId>,
) -> Result<Json<Answer>, AppError> {
    let answer = AnswerService::get_answer_by_id(&state.db, id).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    put,
    path = "/api/answers/{id}",
    params(("id" = Uuid, Path, description = "Answer ID")),
    request_body = UpdateAnswerDto,
    responses(
        (status = 200, description = "Answer updated", body = Answer),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Answer not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Answers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_answer(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<AnswerId>,
    ValidatedJson(dto): ValidatedJson<UpdateAnswerDto>,
) -> Result<Json<Answer>, AppError> {
    let answer = AnswerService::update_answer(&state.db, id, dto).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    delete,
    path = "/api/answers/{id}",
    params(("id" = Uuid, Path, description = "Answer ID")),
    responses(
        (status = 200, description = "Answer deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Answer not found")
    ),
    tag = "Answers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_answer(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<AnswerId>,
) -> Result<Json<MessageResponse>, AppError> {
    AnswerService::delete_answer(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Answer")))
}
