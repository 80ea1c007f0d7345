//! Course exams. A course has at most one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, ExamId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub description: String,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateExamDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub course_id: CourseId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateExamDto {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub course_id: Option<CourseId>,
}

paginated_response!(PaginatedExamsResponse, Exam);
