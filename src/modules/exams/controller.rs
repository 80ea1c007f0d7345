use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CourseId, ExamId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateExamDto, Exam, PaginatedExamsResponse, UpdateExamDto};
use super::service::ExamService;

#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "This course already has an exam"),
        (status = 422, description = "Validation error")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_exam(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    get,
    path = "/api/exams",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of exams", body = PaginatedExamsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_exams(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedExamsResponse>, AppError> {
    let exams = ExamService::get_exams(&state.db, pagination).await?;
    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam details", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_exam_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<ExamId>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::get_exam_by_id(&state.db, id).await?;
    Ok(Json(exam))
}

/// The exam of a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/exam",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Exam of the course", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found, or the course has no exam")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_exam(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::get_exam_by_course(&state.db, id).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Exam or course not found"),
        (status = 409, description = "Target course already has an exam")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_exam(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ExamId>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::update_exam(&state.db, id, dto).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    delete,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_exam(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ExamId>,
) -> Result<Json<MessageResponse>, AppError> {
    ExamService::delete_exam(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Exam")))
}
