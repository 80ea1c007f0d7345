use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{FeedbackId, StudentId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{CreateFeedbackDto, Feedback, PaginatedFeedbacksResponse, UpdateFeedbackDto};

const FEEDBACK_COLUMNS: &str = "id, description, review, student_id, created_at, updated_at";

fn feedback_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Feedback not found"))
}

pub struct FeedbackService;

impl FeedbackService {
    #[instrument(skip(db))]
    pub async fn create_feedback(
        db: &PgPool,
        dto: CreateFeedbackDto,
    ) -> Result<Feedback, AppError> {
        ensure_exists(db, "students", "Student", dto.student_id).await?;

        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedbacks (description, review, student_id)
             VALUES ($1, $2, $3)
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(&dto.description)
        .bind(dto.review)
        .bind(dto.student_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(feedback)
    }

    #[instrument(skip(db))]
    pub async fn get_feedbacks(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedFeedbacksResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedbacks")
            .fetch_one(db)
            .await?;

        let feedbacks = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedbacks ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedFeedbacksResponse {
            data: feedbacks,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_feedbacks_by_student(
        db: &PgPool,
        student_id: StudentId,
        pagination: PaginationParams,
    ) -> Result<PaginatedFeedbacksResponse, AppError> {
        ensure_exists(db, "students", "Student", student_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedbacks WHERE student_id = $1")
                .bind(student_id)
                .fetch_one(db)
                .await?;

        let feedbacks = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedbacks
             WHERE student_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(student_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedFeedbacksResponse {
            data: feedbacks,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_feedback_by_id(db: &PgPool, id: FeedbackId) -> Result<Feedback, AppError> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(feedback_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_feedback(
        db: &PgPool,
        id: FeedbackId,
        dto: UpdateFeedbackDto,
    ) -> Result<Feedback, AppError> {
        sqlx::query_as::<_, Feedback>(&format!(
            "UPDATE feedbacks SET
                description = COALESCE($2, description),
                review = COALESCE($3, review),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.description)
        .bind(dto.review)
        .fetch_optional(db)
        .await?
        .ok_or_else(feedback_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_feedback(db: &PgPool, id: FeedbackId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(feedback_not_found());
        }

        Ok(())
    }
}
