use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{ArticleId, CourseId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{Article, CreateArticleDto, PaginatedArticlesResponse, UpdateArticleDto};

const ARTICLE_COLUMNS: &str = "id, title, link, description, course_id, created_at, updated_at";

pub struct ArticleService;

impl ArticleService {
    #[instrument(skip(db))]
    pub async fn create_article(db: &PgPool, dto: CreateArticleDto) -> Result<Article, AppError> {
        ensure_exists(db, "courses", "Course", dto.course_id).await?;

        let article = sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (title, link, description, course_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.link)
        .bind(&dto.description)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(article)
    }

    #[instrument(skip(db))]
    pub async fn get_articles(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedArticlesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
            .fetch_one(db)
            .await?;

        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedArticlesResponse {
            data: articles,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_articles_by_course(
        db: &PgPool,
        course_id: CourseId,
        pagination: PaginationParams,
    ) -> Result<PaginatedArticlesResponse, AppError> {
        ensure_exists(db, "courses", "Course", course_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(db)
                .await?;

        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             WHERE course_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(course_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedArticlesResponse {
            data: articles,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_article_by_id(db: &PgPool, id: ArticleId) -> Result<Article, AppError> {
        sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Article not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_article(
        db: &PgPool,
        id: ArticleId,
        dto: UpdateArticleDto,
    ) -> Result<Article, AppError> {
        if let Some(course_id) = dto.course_id {
            ensure_exists(db, "courses", "Course", course_id).await?;
        }

        sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                link = COALESCE($3, link),
                description = COALESCE($4, description),
                course_id = COALESCE($5, course_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.link)
        .bind(&dto.description)
        .bind(dto.course_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Article not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_article(db: &PgPool, id: ArticleId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Article not found")));
        }

        Ok(())
    }
}
