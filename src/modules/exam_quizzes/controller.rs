use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{ExamId, ExamQuizId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateExamQuizDto, ExamQuiz, PaginatedExamQuizzesResponse, UpdateExamQuizDto,
};
use super::service::ExamQuizService;

#[utoipa::path(
    post,
    path = "/api/exam-quizzes",
    request_body = CreateExamQuizDto,
    responses(
        (status = 201, description = "Quiz created", body = ExamQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Exam not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Exam Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_exam_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateExamQuizDto>,
) -> Result<(StatusCode, Json<ExamQuiz>), AppError> {
    let quiz = ExamQuizService::create_quiz(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[utoipa::path(
    get,
    path = "/api/exam-quizzes",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of exam quizzes", body = PaginatedExamQuizzesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Exam Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_exam_quizzes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedExamQuizzesResponse>, AppError> {
    let quizzes = ExamQuizService::get_quizzes(&state.db, pagination).await?;
    Ok(Json(quizzes))
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}/quizzes",
    params(
        ("id" = Uuid, Path, description = "Exam ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Quizzes of the exam", body = PaginatedExamQuizzesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_exam_quizzes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<ExamId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedExamQuizzesResponse>, AppError> {
    let quizzes = ExamQuizService::get_quizzes_by_exam(&state.db, id, pagination).await?;
    Ok(Json(quizzes))
}

#[utoipa::path(
    get,
    path = "/api/exam-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Exam quiz ID")),
    responses(
        (status = 200, description = "Quiz details", body = ExamQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exam quiz not found")
    ),
    tag = "Exam Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_exam_quiz_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<ExamQuizId>,
) -> Result<Json<ExamQuiz>, AppError> {
    let quiz = ExamQuizService::get_quiz_by_id(&state.db, id).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    put,
    path = "/api/exam-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Exam quiz ID")),
    request_body = UpdateExamQuizDto,
    responses(
        (status = 200, description = "Quiz updated", body = ExamQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Quiz or exam not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Exam Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_exam_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ExamQuizId>,
    ValidatedJson(dto): ValidatedJson<UpdateExamQuizDto>,
) -> Result<Json<ExamQuiz>, AppError> {
    let quiz = ExamQuizService::update_quiz(&state.db, id, dto).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    delete,
    path = "/api/exam-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Exam quiz ID")),
    responses(
        (status = 200, description = "Quiz deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Exam quiz not found")
    ),
    tag = "Exam Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_exam_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ExamQuizId>,
) -> Result<Json<MessageResponse>, AppError> {
    ExamQuizService::delete_quiz(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Exam quiz")))
}
