use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use dzskills_core::{AppError, FileStorage, PaginationMeta};
use dzskills_models::ids::{CourseId, TeacherId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    Course, CourseFilterParams, CourseImageResponse, CourseImageValidator, CreateCourseDto,
    FileMetadata, PaginatedCoursesResponse, UpdateCourseDto,
};

const COURSE_COLUMNS: &str = "id, name, description, pricing, duration_minutes, image, language, level, teacher_id, category_id, created_at, updated_at";

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(teacher.id = %teacher_id, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        teacher_id: TeacherId,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        ensure_exists(db, "teachers", "Teacher", teacher_id).await?;
        ensure_exists(db, "categories", "Category", dto.category_id).await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (name, description, pricing, duration_minutes, language, level, teacher_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.pricing)
        .bind(dto.duration_minutes)
        .bind(&dto.language)
        .bind(&dto.level)
        .bind(teacher_id)
        .bind(dto.category_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        info!(course.id = %course.id, "Course created");

        Ok(course)
    }

    /// Lists courses, optionally narrowed to one category and/or one teacher.
    #[instrument(skip(db))]
    pub async fn get_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM courses
               WHERE ($1::uuid IS NULL OR category_id = $1)
                 AND ($2::uuid IS NULL OR teacher_id = $2)"#,
        )
        .bind(filters.category_id)
        .bind(filters.teacher_id)
        .fetch_one(db)
        .await?;

        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE ($1::uuid IS NULL OR category_id = $1)
               AND ($2::uuid IS NULL OR teacher_id = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.category_id)
        .bind(filters.teacher_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCoursesResponse {
            data: courses,
            meta: PaginationMeta::from_params(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_course_by_id(db: &PgPool, id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        if let Some(category_id) = dto.category_id {
            ensure_exists(db, "categories", "Category", category_id).await?;
        }

        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                pricing = COALESCE($4, pricing),
                duration_minutes = COALESCE($5, duration_minutes),
                language = COALESCE($6, language),
                level = COALESCE($7, level),
                category_id = COALESCE($8, category_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.pricing)
        .bind(dto.duration_minutes)
        .bind(&dto.language)
        .bind(&dto.level)
        .bind(dto.category_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(course_not_found)
    }

    /// Deletes the course and, once the row is gone, its cover image.
    #[instrument(skip(db, file_storage))]
    pub async fn delete_course(
        db: &PgPool,
        id: CourseId,
        file_storage: &dyn FileStorage,
    ) -> Result<(), AppError> {
        let image = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM courses WHERE id = $1 RETURNING image",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)?;

        if let Some(key) = image {
            if let Err(e) = file_storage.delete(&key).await {
                warn!(course.id = %id, storage_key = %key, error = %e, "Failed to delete course image");
            }
        }

        Ok(())
    }

    /// Stores a new cover image and replaces the previous one.
    #[instrument(skip(db, file_bytes, file_storage), fields(course.id = %course_id, file.size = file_bytes.len(), db.operation = "UPDATE", db.table = "courses"))]
    pub async fn upload_course_image(
        db: &PgPool,
        course_id: CourseId,
        file_bytes: Vec<u8>,
        metadata: FileMetadata,
        file_storage: &dyn FileStorage,
    ) -> Result<CourseImageResponse, AppError> {
        let course = Self::get_course_by_id(db, course_id).await?;

        CourseImageValidator::validate(&metadata)?;

        let now = chrono::Utc::now().timestamp_millis();
        let ext = CourseImageValidator::get_extension(&metadata.mime_type);
        let storage_key = format!("courses/{}-{}.{}", course_id, now, ext);

        debug!(storage_key = %storage_key, "Saving course image");

        file_storage
            .save(&storage_key, &file_bytes)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to save course image");
                AppError::bad_request(anyhow::anyhow!("Failed to save image: {}", e))
            })?;

        let updated = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET image = $2, updated_at = NOW() WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(course_id)
        .bind(&storage_key)
        .fetch_optional(db)
        .await
        .map_err(AppError::from)
        .and_then(|row| row.ok_or_else(course_not_found));

        // The new file is only referenced once the row points at it.
        let updated = match updated {
            Ok(course) => course,
            Err(err) => {
                if let Err(e) = file_storage.delete(&storage_key).await {
                    warn!(error = %e, storage_key = %storage_key, "Failed to remove orphaned course image");
                }
                return Err(err);
            }
        };

        if let Some(old_key) = course.image.as_deref() {
            debug!(old_key = %old_key, "Deleting previous course image");
            let _ = file_storage.delete(old_key).await;
        }

        let image_url = file_storage
            .get_url(&storage_key)
            .map_err(|e| AppError::internal_error(e.to_string()))?;

        info!(storage_key = %storage_key, "Course image uploaded");

        Ok(CourseImageResponse {
            course: updated,
            image_url,
        })
    }
}
