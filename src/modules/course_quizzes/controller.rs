use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CourseId, CourseQuizId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CourseQuiz, CreateCourseQuizDto, PaginatedCourseQuizzesResponse, UpdateCourseQuizDto,
};
use super::service::CourseQuizService;

#[utoipa::path(
    post,
    path = "/api/course-quizzes",
    request_body = CreateCourseQuizDto,
    responses(
        (status = 201, description = "Quiz created", body = CourseQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Course Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_course_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCourseQuizDto>,
) -> Result<(StatusCode, Json<CourseQuiz>), AppError> {
    let quiz = CourseQuizService::create_quiz(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[utoipa::path(
    get,
    path = "/api/course-quizzes",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of course quizzes", body = PaginatedCourseQuizzesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Course Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_course_quizzes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedCourseQuizzesResponse>, AppError> {
    let quizzes = CourseQuizService::get_quizzes(&state.db, pagination).await?;
    Ok(Json(quizzes))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/quizzes",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Practice quizzes of the course", body = PaginatedCourseQuizzesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_quizzes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedCourseQuizzesResponse>, AppError> {
    let quizzes = CourseQuizService::get_quizzes_by_course(&state.db, id, pagination).await?;
    Ok(Json(quizzes))
}

#[utoipa::path(
    get,
    path = "/api/course-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Course quiz ID")),
    responses(
        (status = 200, description = "Quiz details", body = CourseQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course quiz not found")
    ),
    tag = "Course Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_quiz_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseQuizId>,
) -> Result<Json<CourseQuiz>, AppError> {
    let quiz = CourseQuizService::get_quiz_by_id(&state.db, id).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    put,
    path = "/api/course-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Course quiz ID")),
    request_body = UpdateCourseQuizDto,
    responses(
        (status = 200, description = "Quiz updated", body = CourseQuiz),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Quiz or course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Course Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_course_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CourseQuizId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseQuizDto>,
) -> Result<Json<CourseQuiz>, AppError> {
    let quiz = CourseQuizService::update_quiz(&state.db, id, dto).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    delete,
    path = "/api/course-quizzes/{id}",
    params(("id" = Uuid, Path, description = "Course quiz ID")),
    responses(
        (status = 200, description = "Quiz deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course quiz not found")
    ),
    tag = "Course Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_course_quiz(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CourseQuizId>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseQuizService::delete_quiz(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Course quiz")))
}
