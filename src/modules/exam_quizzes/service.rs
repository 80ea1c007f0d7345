use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{ExamId, ExamQuizId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    CreateExamQuizDto, ExamQuiz, PaginatedExamQuizzesResponse, UpdateExamQuizDto,
};

const QUIZ_COLUMNS: &str =
    "id, question, option1, option2, option3, option4, answer, exam_id, created_at, updated_at";

fn quiz_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Exam quiz not found"))
}

pub struct ExamQuizService;

impl ExamQuizService {
    #[instrument(skip(db))]
    pub async fn create_quiz(db: &PgPool, dto: CreateExamQuizDto) -> Result<ExamQuiz, AppError> {
        ensure_exists(db, "exams", "Exam", dto.exam_id).await?;

        let quiz = sqlx::query_as::<_, ExamQuiz>(&format!(
            "INSERT INTO exam_quizzes (question, option1, option2, option3, option4, answer, exam_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {QUIZ_COLUMNS}"
        ))
        .bind(&dto.question)
        .bind(&dto.option1)
        .bind(&dto.option2)
        .bind(&dto.option3)
        .bind(&dto.option4)
        .bind(dto.answer)
        .bind(dto.exam_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(quiz)
    }

    #[instrument(skip(db))]
    pub async fn get_quizzes(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedExamQuizzesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exam_quizzes")
            .fetch_one(db)
            .await?;

        let quizzes = sqlx::query_as::<_, ExamQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM exam_quizzes ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedExamQuizzesResponse {
            data: quizzes,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_quizzes_by_exam(
        db: &PgPool,
        exam_id: ExamId,
        pagination: PaginationParams,
    ) -> Result<PaginatedExamQuizzesResponse, AppError> {
        ensure_exists(db, "exams", "Exam", exam_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM exam_quizzes WHERE exam_id = $1",
        )
        .bind(exam_id)
        .fetch_one(db)
        .await?;

        let quizzes = sqlx::query_as::<_, ExamQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM exam_quizzes
             WHERE exam_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(exam_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedExamQuizzesResponse {
            data: quizzes,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_quiz_by_id(db: &PgPool, id: ExamQuizId) -> Result<ExamQuiz, AppError> {
        sqlx::query_as::<_, ExamQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM exam_quizzes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(quiz_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_quiz(
        db: &PgPool,
        id: ExamQuizId,
        dto: UpdateExamQuizDto,
    ) -> Result<ExamQuiz, AppError> {
        if let Some(exam_id) = dto.exam_id {
            ensure_exists(db, "exams", "Exam", exam_id).await?;
        }

        sqlx::query_as::<_, ExamQuiz>(&format!(
            "UPDATE exam_quizzes SET
                question = COALESCE($2, question),
                option1 = COALESCE($3, option1),
                option2 = COALESCE($4, option2),
                option3 = COALESCE($5, option3),
                option4 = COALESCE($6, option4),
                answer = COALESCE($7, answer),
                exam_id = COALESCE($8, exam_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {QUIZ_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.question)
        .bind(&dto.option1)
        .bind(&dto.option2)
        .bind(&dto.option3)
        .bind(&dto.option4)
        .bind(dto.answer)
        .bind(dto.exam_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(quiz_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_quiz(db: &PgPool, id: ExamQuizId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM exam_quizzes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(quiz_not_found());
        }

        Ok(())
    }
}
