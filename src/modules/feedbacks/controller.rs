use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{FeedbackId, StudentId};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateFeedbackDto, Feedback, PaginatedFeedbacksResponse, UpdateFeedbackDto};
use super::service::FeedbackService;

/// Leave feedback about the platform
#[utoipa::path(
    post,
    path = "/api/feedbacks",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback created", body = Feedback),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Student id does not match the token"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Feedbacks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeedbackDto>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    auth_user.ensure_teacher_or_student(dto.student_id.into_inner())?;
    let feedback = FeedbackService::create_feedback(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

#[utoipa::path(
    get,
    path = "/api/feedbacks",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of feedbacks", body = PaginatedFeedbacksResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Feedbacks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_feedbacks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedFeedbacksResponse>, AppError> {
    let feedbacks = FeedbackService::get_feedbacks(&state.db, pagination).await?;
    Ok(Json(feedbacks))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/feedbacks",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Feedbacks left by the student", body = PaginatedFeedbacksResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student_feedbacks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<StudentId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedFeedbacksResponse>, AppError> {
    let feedbacks = FeedbackService::get_feedbacks_by_student(&state.db, id, pagination).await?;
    Ok(Json(feedbacks))
}

#[utoipa::path(
    get,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback details", body = Feedback),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Feedbacks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_feedback_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<FeedbackId>,
) -> Result<Json<Feedback>, AppError> {
    let feedback = FeedbackService::get_feedback_by_id(&state.db, id).await?;
    Ok(Json(feedback))
}

#[utoipa::path(
    put,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    request_body = UpdateFeedbackDto,
    responses(
        (status = 200, description = "Feedback updated", body = Feedback),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Feedback belongs to another student"),
        (status = 404, description = "Feedback not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Feedbacks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FeedbackId>,
    ValidatedJson(dto): ValidatedJson<UpdateFeedbackDto>,
) -> Result<Json<Feedback>, AppError> {
    let existing = FeedbackService::get_feedback_by_id(&state.db, id).await?;
    auth_user.ensure_teacher_or_student(existing.student_id.into_inner())?;

    let feedback = FeedbackService::update_feedback(&state.db, id, dto).await?;
    Ok(Json(feedback))
}

#[utoipa::path(
    delete,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Feedback belongs to another student"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Feedbacks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FeedbackId>,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = FeedbackService::get_feedback_by_id(&state.db, id).await?;
    auth_user.ensure_teacher_or_student(existing.student_id.into_inner())?;

    FeedbackService::delete_feedback(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Feedback")))
}
