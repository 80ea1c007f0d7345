//! Course ratings, one per (course, student) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, StudentId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct CourseRating {
    pub course_id: CourseId,
    pub student_id: StudentId,
    /// Score from 0 to 5
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateRatingDto {
    pub course_id: CourseId,
    pub student_id: StudentId,
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: i16,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateRatingDto {
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: i16,
}

/// Mean rating of a course. `average_rating` is 0 when nobody rated it.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct AverageRating {
    pub course_id: CourseId,
    pub average_rating: f64,
    pub total_ratings: i64,
}

paginated_response!(PaginatedRatingsResponse, CourseRating);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let ok = UpdateRatingDto { rating: 5 };
        assert!(ok.validate().is_ok());
        let too_low = UpdateRatingDto { rating: -1 };
        assert!(too_low.validate().is_err());
    }
}
