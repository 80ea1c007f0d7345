use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::QuestionId;

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{CreateQuestionDto, PaginatedQuestionsResponse, Question, UpdateQuestionDto};

const QUESTION_COLUMNS: &str = "id, question, course_id, student_id, created_at, updated_at";

fn question_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Question not found"))
}

pub struct QuestionService;

impl QuestionService {
    #[instrument(skip(db))]
    pub async fn create_question(
        db: &PgPool,
        dto: CreateQuestionDto,
    ) -> Result<Question, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;
        ensure_exists(db, "students", "Student", dto.student_id).await?;

        let question = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions (question, course_id, student_id)
             VALUES ($1, $2, $3)
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(&dto.question)
        .bind(dto.course_id)
        .bind(dto.student_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(question)
    }

    #[instrument(skip(db))]
    pub async fn get_questions(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedQuestionsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(db)
            .await?;

        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedQuestionsResponse {
            data: questions,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_question_by_id(db: &PgPool, id: QuestionId) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(question_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_question(
        db: &PgPool,
        id: QuestionId,
        dto: UpdateQuestionDto,
    ) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(&format!(
            "UPDATE questions SET question = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.question)
        .fetch_optional(db)
        .await?
        .ok_or_else(question_not_found)
    }

    /// Removes the question and, through the cascade, its answers.
    #[instrument(skip(db))]
    pub async fn delete_question(db: &PgPool, id: QuestionId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(question_not_found());
        }

        Ok(())
    }
}
