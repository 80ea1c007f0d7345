use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{VideoId, CourseId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Video, CreateVideoDto, PaginatedVideosResponse, UpdateVideoDto};
use super::service::VideoService;

#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = CreateVideoDto,
    responses(
        (status = 201, description = "Video created", body = Video),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_video(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateVideoDto>,
) -> Result<(StatusCode, Json<Video>), AppError> {
    let video = VideoService::create_video(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of videos", body = PaginatedVideosResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_videos(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedVideosResponse>, AppError> {
    let videos = VideoService::get_videos(&state.db, pagination).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/videos",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Videos of the course", body = PaginatedVideosResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_videos(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedVideosResponse>, AppError> {
    let videos = VideoService::get_videos_by_course(&state.db, id, pagination).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video details", body = Video),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_video_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<VideoId>,
) -> Result<Json<Video>, AppError> {
    let video = VideoService::get_video_by_id(&state.db, id).await?;
    Ok(Json(video))
}

#[utoipa::path(
    put,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    request_body = UpdateVideoDto,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Video or course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_video(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<VideoId>,
    ValidatedJson(dto): ValidatedJson<UpdateVideoDto>,
) -> Result<Json<Video>, AppError> {
    let video = VideoService::update_video(&state.db, id, dto).await?;
    Ok(Json(video))
}

#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_video(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<VideoId>,
) -> Result<Json<MessageResponse>, AppError> {
    VideoService::delete_video(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Video")))
}
