//! Courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use dzskills_core::PaginationParams;
use dzskills_core::serde::deserialize_optional_uuid;

use crate::ids::{CategoryId, CourseId, TeacherId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "2500 DZD")]
    pub pricing: Option<String>,
    pub duration_minutes: Option<i32>,
    /// Storage key of the uploaded cover image, served under `/files/`
    pub image: Option<String>,
    pub language: Option<String>,
    pub level: Option<String>,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New course. The owning teacher is the caller.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub pricing: Option<String>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 50))]
    pub language: Option<String>,
    #[validate(length(max = 50))]
    pub level: Option<String>,
    pub category_id: CategoryId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub pricing: Option<String>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 50))]
    pub language: Option<String>,
    #[validate(length(max = 50))]
    pub level: Option<String>,
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseFilterParams {
    /// Only courses in this category
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub category_id: Option<Uuid>,
    /// Only courses taught by this teacher
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub teacher_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Response of `POST /api/courses/{id}/image`.
#[derive(Serialize, Debug, ToSchema)]
pub struct CourseImageResponse {
    pub course: Course,
    pub image_url: String,
}

/// Metadata of an uploaded image, read from the multipart part.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub mime_type: String,
    pub size_bytes: usize,
}

paginated_response!(PaginatedCoursesResponse, Course);
