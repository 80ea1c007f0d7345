use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{VideoId, CourseId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{Video, CreateVideoDto, PaginatedVideosResponse, UpdateVideoDto};

const VIDEO_COLUMNS: &str = "id, title, link, course_id, created_at, updated_at";

pub struct VideoService;

impl VideoService {
    #[instrument(skip(db))]
    pub async fn create_video(db: &PgPool, dto: CreateVideoDto) -> Result<Video, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;

        let video = sqlx::query_as::<_, Video>(&format!(
            "INSERT INTO videos (title, link, course_id)
             VALUES ($1, $2, $3)
             RETURNING {VIDEO_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.link)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(video)
    }

    #[instrument(skip(db))]
    pub async fn get_videos(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedVideosResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos")
            .fetch_one(db)
            .await?;

        let videos = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedVideosResponse {
            data: videos,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_videos_by_course(
        db: &PgPool,
        course_id: CourseId,
        pagination: PaginationParams,
    ) -> Result<PaginatedVideosResponse, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(db)
                .await?;

        let videos = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos
             WHERE course_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(course_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedVideosResponse {
            data: videos,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_video_by_id(db: &PgPool, id: VideoId) -> Result<Video, AppError> {
        sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Video not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_video(
        db: &PgPool,
        id: VideoId,
        dto: UpdateVideoDto,
    ) -> Result<Video, AppError> {
        if let Some(course_id) = dto.course_id {
            ensure_exists(db, "courses", "Course", course_id).await?;
        }

        sqlx::query_as::<_, Video>(&format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                link = COALESCE($3, link),
                course_id = COALESCE($4, course_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {VIDEO_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.link)
        .bind(dto.course_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Video not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_video(db: &PgPool, id: VideoId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Video not found")));
        }

        Ok(())
    }
}
