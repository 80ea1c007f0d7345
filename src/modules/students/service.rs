use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use dzskills_models::ids::StudentId;

use crate::metrics::track_account_registered;
use crate::utils::db::map_db_error;

use super::model::{CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, full_name, username, email, picture, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (full_name, username, email, password, picture)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.picture)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        track_account_registered("student");

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET
                full_name = COALESCE($2, full_name),
                username = COALESCE($3, username),
                email = COALESCE($4, email),
                password = COALESCE($5, password),
                picture = COALESCE($6, picture),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.full_name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.picture)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
