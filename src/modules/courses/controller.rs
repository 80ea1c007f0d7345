use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use utoipa::ToSchema;

use dzskills_core::AppError;
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CourseId, TeacherId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    Course, CourseFilterParams, CourseImageResponse, CreateCourseDto, FileMetadata,
    PaginatedCoursesResponse, UpdateCourseDto,
};
use super::service::CourseService;

/// Multipart form accepted by the image upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CourseImageForm {
    /// PNG, JPEG or WebP, at most 5MB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Create a course owned by the calling teacher
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Category or teacher not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireTeacher(teacher): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let teacher_id = TeacherId::from_uuid(teacher.user_id()?);
    let course = CourseService::create_course(&state.db, teacher_id, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses, optionally filtered by category or teacher
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "List of courses", body = PaginatedCoursesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let courses = CourseService::get_courses(&state.db, filters).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course or category not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

/// Delete a course together with its material, exam, ratings and enrollments
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_course(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CourseId>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id, &state.file_storage).await?;
    Ok(Json(MessageResponse::deleted("Course")))
}

/// Upload or replace the course cover image
#[utoipa::path(
    post,
    path = "/api/courses/{id}/image",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body(content = CourseImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = CourseImageResponse),
        (status = 400, description = "Missing, empty, oversized or unsupported file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 413, description = "Request body too large")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher, multipart))]
pub async fn upload_course_image(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CourseId>,
    mut multipart: Multipart,
) -> Result<Json<CourseImageResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(e.status(), anyhow::anyhow!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::new(e.status(), anyhow::anyhow!("Failed to read image: {}", e)))?;

        upload = Some((bytes.to_vec(), mime_type));
        break;
    }

    let (file_bytes, mime_type) = upload
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("image field is required")))?;

    let metadata = FileMetadata {
        mime_type,
        size_bytes: file_bytes.len(),
    };

    let response = CourseService::upload_course_image(
        &state.db,
        id,
        file_bytes,
        metadata,
        &state.file_storage,
    )
    .await?;

    Ok(Json(response))
}
