//! Video lessons attached to a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, VideoId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub link: String,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateVideoDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(url)]
    pub link: String,
    pub course_id: CourseId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateVideoDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(url)]
    pub link: Option<String>,
    pub course_id: Option<CourseId>,
}

paginated_response!(PaginatedVideosResponse, Video);
