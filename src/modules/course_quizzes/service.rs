use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{CourseId, CourseQuizId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    CourseQuiz, CreateCourseQuizDto, PaginatedCourseQuizzesResponse, UpdateCourseQuizDto,
};

const QUIZ_COLUMNS: &str =
    "id, question, option1, option2, option3, option4, answer, course_id, created_at, updated_at";

fn quiz_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course quiz not found"))
}

pub struct CourseQuizService;

impl CourseQuizService {
    #[instrument(skip(db))]
    pub async fn create_quiz(db: &PgPool, dto: CreateCourseQuizDto) -> Result<CourseQuiz, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;

        let quiz = sqlx::query_as::<_, CourseQuiz>(&format!(
            "INSERT INTO course_quizzes (question, option1, option2, option3, option4, answer, course_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {QUIZ_COLUMNS}"
        ))
        .bind(&dto.question)
        .bind(&dto.option1)
        .bind(&dto.option2)
        .bind(&dto.option3)
        .bind(&dto.option4)
        .bind(dto.answer)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(quiz)
    }

    #[instrument(skip(db))]
    pub async fn get_quizzes(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedCourseQuizzesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM course_quizzes")
            .fetch_one(db)
            .await?;

        let quizzes = sqlx::query_as::<_, CourseQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM course_quizzes ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCourseQuizzesResponse {
            data: quizzes,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_quizzes_by_course(
        db: &PgPool,
        course_id: CourseId,
        pagination: PaginationParams,
    ) -> Result<PaginatedCourseQuizzesResponse, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_quizzes WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(db)
        .await?;

        let quizzes = sqlx::query_as::<_, CourseQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM course_quizzes
             WHERE course_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(course_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCourseQuizzesResponse {
            data: quizzes,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_quiz_by_id(db: &PgPool, id: CourseQuizId) -> Result<CourseQuiz, AppError> {
        sqlx::query_as::<_, CourseQuiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM course_quizzes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(quiz_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_quiz(
        db: &PgPool,
        id: CourseQuizId,
        dto: UpdateCourseQuizDto,
    ) -> Result<CourseQuiz, AppError> {
        if let Some(course_id) = dto.course_id {
            ensure_exists(db, "courses", "Course", course_id).await?;
        }

        sqlx::query_as::<_, CourseQuiz>(&format!(
            "UPDATE course_quizzes SET
                question = COALESCE($2, question),
                option1 = COALESCE($3, option1),
                option2 = COALESCE($4, option2),
                option3 = COALESCE($5, option3),
                option4 = COALESCE($6, option4),
                answer = COALESCE($7, answer),
                course_id = COALESCE($8, course_id),
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
        .bind(dto.course_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(quiz_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_quiz(db: &PgPool, id: CourseQuizId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM course_quizzes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(quiz_not_found());
        }

        Ok(())
    }
}
