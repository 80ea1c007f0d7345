use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use dzskills_models::ids::TeacherId;

use crate::metrics::track_account_registered;
use crate::utils::db::map_db_error;

use super::model::{CreateTeacherDto, PaginatedTeachersResponse, Teacher, UpdateTeacherDto};

const TEACHER_COLUMNS: &str = "id, full_name, username, email, picture, skills, degrees, experience, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (full_name, username, email, password, picture, skills, degrees, experience)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.picture)
        .bind(&dto.skills)
        .bind(&dto.degrees)
        .bind(&dto.experience)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        track_account_registered("teacher");

        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn get_teachers(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;

        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedTeachersResponse {
            data: teachers,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, id: TeacherId) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    /// Applies the fields present in `dto`; a new password is hashed first.
    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: TeacherId,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers SET
                full_name = COALESCE($2, full_name),
                username = COALESCE($3, username),
                email = COALESCE($4, email),
                password = COALESCE($5, password),
                picture = COALESCE($6, picture),
                skills = COALESCE($7, skills),
                degrees = COALESCE($8, degrees),
                experience = COALESCE($9, experience),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.full_name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.picture)
        .bind(&dto.skills)
        .bind(&dto.degrees)
        .bind(&dto.experience)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: TeacherId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
