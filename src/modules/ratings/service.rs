use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{CourseId, StudentId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    AverageRating, CourseRating, CreateRatingDto, PaginatedRatingsResponse, UpdateRatingDto,
};

const RATING_COLUMNS: &str = "course_id, student_id, rating, created_at, updated_at";

fn rating_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Rating not found"))
}

pub struct RatingService;

impl RatingService {
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "course_ratings"))]
    pub async fn create_rating(
        db: &PgPool,
        dto: CreateRatingDto,
    ) -> Result<CourseRating, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;
        ensure_exists(db, "students", "Student", dto.student_id).await?;

        let rating = sqlx::query_as::<_, CourseRating>(&format!(
            "INSERT INTO course_ratings (course_id, student_id, rating)
             VALUES ($1, $2, $3)
             RETURNING {RATING_COLUMNS}"
        ))
        .bind(dto.course_id)
        .bind(dto.student_id)
        .bind(dto.rating)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(rating)
    }

    #[instrument(skip(db))]
    pub async fn get_ratings(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedRatingsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM course_ratings")
            .fetch_one(db)
            .await?;

        let ratings = sqlx::query_as::<_, CourseRating>(&format!(
            "SELECT {RATING_COLUMNS} FROM course_ratings
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedRatingsResponse {
            data: ratings,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_ratings_by_course(
        db: &PgPool,
        course_id: CourseId,
        pagination: PaginationParams,
    ) -> Result<PaginatedRatingsResponse, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_ratings WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(db)
        .await?;

        let ratings = sqlx::query_as::<_, CourseRating>(&format!(
            "SELECT {RATING_COLUMNS} FROM course_ratings
             WHERE course_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(course_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedRatingsResponse {
            data: ratings,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_ratings_by_student(
        db: &PgPool,
        student_id: StudentId,
        pagination: PaginationParams,
    ) -> Result<PaginatedRatingsResponse, AppError> {
        ensure_exists(db, "students", "Student", student_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_ratings WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_one(db)
        .await?;

        let ratings = sqlx::query_as::<_, CourseRating>(&format!(
            "SELECT {RATING_COLUMNS} FROM course_ratings
             WHERE student_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(student_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedRatingsResponse {
            data: ratings,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    /// Mean rating of a course; 0 with a count of 0 when nobody rated it.
    #[instrument(skip(db))]
    pub async fn get_average_rating(
        db: &PgPool,
        course_id: CourseId,
    ) -> Result<AverageRating, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        let (average_rating, total_ratings) = sqlx::query_as::<_, (f64, i64)>(
            "SELECT COALESCE(AVG(rating)::float8, 0), COUNT(*)
             FROM course_ratings WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok(AverageRating {
            course_id,
            average_rating,
            total_ratings,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_rating(
        db: &PgPool,
        course_id: CourseId,
        student_id: StudentId,
    ) -> Result<CourseRating, AppError> {
        sqlx::query_as::<_, CourseRating>(&format!(
            "SELECT {RATING_COLUMNS} FROM course_ratings
             WHERE course_id = $1 AND student_id = $2"
        ))
        .bind(course_id)
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(rating_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_rating(
        db: &PgPool,
        course_id: CourseId,
        student_id: StudentId,
        dto: UpdateRatingDto,
    ) -> Result<CourseRating, AppError> {
        sqlx::query_as::<_, CourseRating>(&format!(
            "UPDATE course_ratings SET rating = $3, updated_at = NOW()
             WHERE course_id = $1 AND student_id = $2
             RETURNING {RATING_COLUMNS}"
        ))
        .bind(course_id)
        .bind(student_id)
        .bind(dto.rating)
        .fetch_optional(db)
        .await?
        .ok_or_else(rating_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_rating(
        db: &PgPool,
        course_id: CourseId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM course_ratings WHERE course_id = $1 AND student_id = $2")
                .bind(course_id)
                .bind(student_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(rating_not_found());
        }

        Ok(())
    }
}
