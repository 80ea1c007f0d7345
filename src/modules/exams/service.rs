use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{CourseId, ExamId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{CreateExamDto, Exam, PaginatedExamsResponse, UpdateExamDto};

fn exam_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Exam not found"))
}

pub struct ExamService;

impl ExamService {
    /// A course has at most one exam; a second one is a 409.
    #[instrument(skip(db))]
    pub async fn create_exam(db: &PgPool, dto: CreateExamDto) -> Result<Exam, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;

        let exam = sqlx::query_as::<_, Exam>(
            r#"INSERT INTO exams (description, course_id)
               VALUES ($1, $2)
               RETURNING id, description, course_id, created_at, updated_at"#,
        )
        .bind(&dto.description)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn get_exams(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedExamsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams")
            .fetch_one(db)
            .await?;

        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, description, course_id, created_at, updated_at
               FROM exams
               ORDER BY created_at DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedExamsResponse {
            data: exams,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_exam_by_id(db: &PgPool, id: ExamId) -> Result<Exam, AppError> {
        sqlx::query_as::<_, Exam>(
            "SELECT id, description, course_id, created_at, updated_at FROM exams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(exam_not_found)
    }

    #[instrument(skip(db))]
    pub async fn get_exam_by_course(db: &PgPool, course_id: CourseId) -> Result<Exam, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        sqlx::query_as::<_, Exam>(
            r#"SELECT id, description, course_id, created_at, updated_at
               FROM exams
               WHERE course_id = $1"#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(exam_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_exam(db: &PgPool, id: ExamId, dto: UpdateExamDto) -> Result<Exam, AppError> {
        if let Some(course_id) = dto.course_id {
            ensure_exists(db, "courses", "Course", course_id).await?;
        }

        sqlx::query_as::<_, Exam>(
            r#"UPDATE exams SET
                description = COALESCE($2, description),
                course_id = COALESCE($3, course_id),
                updated_at = NOW()
               WHERE id = $1
               RETURNING id, description, course_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.description)
        .bind(dto.course_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(exam_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, id: ExamId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(exam_not_found());
        }

        Ok(())
    }
}
