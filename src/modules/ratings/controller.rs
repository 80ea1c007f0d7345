use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CourseId, StudentId};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    AverageRating, CourseRating, CreateRatingDto, PaginatedRatingsResponse, UpdateRatingDto,
};
use super::service::RatingService;

/// Rate a course
///
/// A student rates each course at most once; rating again returns 409.
#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = CreateRatingDto,
    responses(
        (status = 201, description = "Rating created", body = CourseRating),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Student id does not match the token"),
        (status = 404, description = "Course or student not found"),
        (status = 409, description = "Student has already rated this course"),
        (status = 422, description = "Validation error")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRatingDto>,
) -> Result<(StatusCode, Json<CourseRating>), AppError> {
    auth_user.ensure_teacher_or_student(dto.student_id.into_inner())?;
    let rating = RatingService::create_rating(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

#[utoipa::path(
    get,
    path = "/api/ratings",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of ratings", body = PaginatedRatingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_ratings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedRatingsResponse>, AppError> {
    let ratings = RatingService::get_ratings(&state.db, pagination).await?;
    Ok(Json(ratings))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Ratings of the course", body = PaginatedRatingsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_ratings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedRatingsResponse>, AppError> {
    let ratings = RatingService::get_ratings_by_course(&state.db, id, pagination).await?;
    Ok(Json(ratings))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/ratings/average",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Average rating of the course", body = AverageRating),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_average_rating(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
) -> Result<Json<AverageRating>, AppError> {
    let average = RatingService::get_average_rating(&state.db, id).await?;
    Ok(Json(average))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Ratings given by the student", body = PaginatedRatingsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student_ratings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<StudentId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedRatingsResponse>, AppError> {
    let ratings = RatingService::get_ratings_by_student(&state.db, id, pagination).await?;
    Ok(Json(ratings))
}

#[utoipa::path(
    get,
    path = "/api/ratings/{course_id}/{student_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Rating details", body = CourseRating),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rating not found")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_rating(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((course_id, student_id)): Path<(CourseId, StudentId)>,
) -> Result<Json<CourseRating>, AppError> {
    let rating = RatingService::get_rating(&state.db, course_id, student_id).await?;
    Ok(Json(rating))
}

#[utoipa::path(
    put,
    path = "/api/ratings/{course_id}/{student_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateRatingDto,
    responses(
        (status = 200, description = "Rating updated", body = CourseRating),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Rating belongs to another student"),
        (status = 404, description = "Rating not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, student_id)): Path<(CourseId, StudentId)>,
    ValidatedJson(dto): ValidatedJson<UpdateRatingDto>,
) -> Result<Json<CourseRating>, AppError> {
    auth_user.ensure_teacher_or_student(student_id.into_inner())?;
    let rating = RatingService::update_rating(&state.db, course_id, student_id, dto).await?;
    Ok(Json(rating))
}

#[utoipa::path(
    delete,
    path = "/api/ratings/{course_id}/{student_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Rating deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Rating belongs to another student"),
        (status = 404, description = "Rating not found")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, student_id)): Path<(CourseId, StudentId)>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.ensure_teacher_or_student(student_id.into_inner())?;
    RatingService::delete_rating(&state.db, course_id, student_id).await?;
    Ok(Json(MessageResponse::deleted("Rating")))
}
