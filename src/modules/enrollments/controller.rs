use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_auth::UserRole;
use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CourseId, StudentId};

use crate::middleware::auth::{AuthUser, RequireStudent, RequireTeacher};
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson, validate_dto};

use super::model::{
    CreateEnrollmentDto, Enrollment, ExamResult, PaginatedEnrollmentsResponse, SubmitExamDto,
    UpdateEnrollmentDto,
};
use super::service::EnrollmentService;

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Student id does not match the token"),
        (status = 404, description = "Student or course not found"),
        (status = 409, description = "Student is already enrolled in this course")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    auth_user.ensure_teacher_or_student(dto.student_id.into_inner())?;
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of enrollments", body = PaginatedEnrollmentsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedEnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::get_enrollments(&state.db, pagination).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/enrollments",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Courses the student is enrolled in", body = PaginatedEnrollmentsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<StudentId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedEnrollmentsResponse>, AppError> {
    let enrollments =
        EnrollmentService::get_enrollments_by_student(&state.db, id, pagination).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{student_id}/{course_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollment details", body = Enrollment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((student_id, course_id)): Path<(StudentId, CourseId)>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::get_enrollment(&state.db, student_id, course_id).await?;
    Ok(Json(enrollment))
}

/// Manually correct an enrollment's grade or certificate
#[utoipa::path(
    put,
    path = "/api/enrollments/{student_id}/{course_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment updated", body = Enrollment),
        (status = 400, description = "Issued without a certificate"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Enrollment not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_enrollment(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path((student_id, course_id)): Path<(StudentId, CourseId)>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrollmentDto>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment =
        EnrollmentService::update_enrollment(&state.db, student_id, course_id, dto).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{student_id}/{course_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Enrollment belongs to another student"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((student_id, course_id)): Path<(StudentId, CourseId)>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.ensure_teacher_or_student(student_id.into_inner())?;
    EnrollmentService::delete_enrollment(&state.db, student_id, course_id).await?;
    Ok(Json(MessageResponse::deleted("Enrollment")))
}

/// Submit the course exam
///
/// Exactly 20 answers, one per exam quiz of the course. A score of 10 or
/// more passes and issues a certificate. Resubmitting overwrites the
/// previous grade.
#[utoipa::path(
    post,
    path = "/api/enrollments/{student_id}/{course_id}/exam",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = SubmitExamDto,
    responses(
        (status = 200, description = "Exam graded", body = ExamResult),
        (status = 400, description = "Wrong number of answers or duplicate quiz"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the enrolled student may submit"),
        (status = 404, description = "Enrollment or exam quiz not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, student, dto))]
pub async fn submit_exam(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Path((student_id, course_id)): Path<(StudentId, CourseId)>,
    JsonBody(dto): JsonBody<SubmitExamDto>,
) -> Result<Json<ExamResult>, AppError> {
    if !student.0.is_account(UserRole::Student, student_id.into_inner()) {
        return Err(AppError::forbidden(
            "You can only submit exams for your own enrollments".to_string(),
        ));
    }
    validate_dto(&dto)?;

    let result = EnrollmentService::submit_exam(&state.db, student_id, course_id, dto).await?;
    Ok(Json(result))
}
