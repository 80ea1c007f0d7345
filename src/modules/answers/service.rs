use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{AnswerId, QuestionId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{Answer, CreateAnswerDto, PaginatedAnswersResponse, UpdateAnswerDto};

fn answer_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Answer not found"))
}

pub struct AnswerService;

impl AnswerService {
    #[instrument(skip(db))]
    pub async fn create_answer(db: &PgPool, dto: CreateAnswerDto) -> Result<Answer, AppError> {
        ensure_exists(db, "questions", "Question", dto.question_id).await?;

        let answer = sqlx::query_as::<_, Answer>(
            r#"INSERT INTO answers (answer, question_id)
               VALUES ($1, $2)
               RETURNING id, answer, question_id, created_at, updated_at"#,
        )
        .bind(&dto.answer)
        .bind(dto.question_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(answer)
    }

    #[instrument(skip(db))]
    pub async fn get_answers(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedAnswersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM answers")
            .fetch_one(db)
            .await?;

        let answers = sqlx::query_as::<_, Answer>(
            r#"SELECT id, answer, question_id, created_at, updated_at
               FROM answers
               ORDER BY created_at DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedAnswersResponse {
            data: answers,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    /// Answers of a question, oldest first.
    #[instrument(skip(db))]
    pub async fn get_answers_by_question(
        db: &PgPool,
        question_id: QuestionId,
        pagination: PaginationParams,
    ) -> Result<PaginatedAnswersResponse, AppError> {
        ensure_exists(db, "questions", "Question", question_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM answers WHERE question_id = $1")
                .bind(question_id)
                .fetch_one(db)
                .await?;

        let answers = sqlx::query_as::<_, Answer>(
            r#"SELECT id, answer, question_id, created_at, updated_at
               FROM answers
               WHERE question_id = $1
               ORDER BY created_at ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(question_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedAnswersResponse {
            data: answers,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_answer_by_id(db: &PgPool, id: AnswerId) -> Result<Answer, AppError> {
        sqlx::query_as::<_, Answer>(
            "SELECT id, answer, question_id, created_at, updated_at FROM answers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(answer_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_answer(
        db: &PgPool,
        id: AnswerId,
        dto: UpdateAnswerDto,
    ) -> Result<Answer, AppError> {
        sqlx::query_as::<_, Answer>(
            r#"UPDATE answers SET answer = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING id, answer, question_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.answer)
        .fetch_optional(db)
        .await?
        .ok_or_else(answer_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_answer(db: &PgPool, id: AnswerId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(answer_not_found());
        }

        Ok(())
    }
}
