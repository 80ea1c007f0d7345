//! Free-form platform feedback left by students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{FeedbackId, StudentId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Feedback {
    pub id: FeedbackId,
    pub description: String,
    /// Score from 0 to 5
    pub review: i16,
    pub student_id: StudentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateFeedbackDto {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0, max = 5, message = "review must be between 0 and 5"))]
    pub review: i16,
    pub student_id: StudentId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateFeedbackDto {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 5, message = "review must be between 0 and 5"))]
    pub review: Option<i16>,
}

paginated_response!(PaginatedFeedbacksResponse, Feedback);
