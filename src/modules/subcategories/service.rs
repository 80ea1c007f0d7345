use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{CategoryId, SubcategoryId};

use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    CreateSubcategoryDto, PaginatedSubcategoriesResponse, Subcategory, UpdateSubcategoryDto,
};

pub struct SubcategoryService;

impl SubcategoryService {
    #[instrument(skip(db))]
    pub async fn create_subcategory(
        db: &PgPool,
        dto: CreateSubcategoryDto,
    ) -> Result<Subcategory, AppError> {
        ensure_exists(db, "categories", "Category", dto.category_id).await?;

        let subcategory = sqlx::query_as::<_, Subcategory>(
            r#"INSERT INTO subcategories (name, category_id)
               VALUES ($1, $2)
               RETURNING id, name, category_id, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(dto.category_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(subcategory)
    }

    #[instrument(skip(db))]
    pub async fn get_subcategories(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedSubcategoriesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subcategories")
            .fetch_one(db)
            .await?;

        let subcategories = sqlx::query_as::<_, Subcategory>(
            r#"SELECT id, name, category_id, created_at, updated_at
               FROM subcategories
               ORDER BY name ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedSubcategoriesResponse {
            data: subcategories,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_subcategories_by_category(
        db: &PgPool,
        category_id: CategoryId,
        pagination: PaginationParams,
    ) -> Result<PaginatedSubcategoriesResponse, AppError> {
        ensure_exists(db, "categories", "Category", category_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subcategories WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(db)
        .await?;

        let subcategories = sqlx::query_as::<_, Subcategory>(
            r#"SELECT id, name, category_id, created_at, updated_at
               FROM subcategories
               WHERE category_id = $1
               ORDER BY name ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(category_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedSubcategoriesResponse {
            data: subcategories,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_subcategory_by_id(
        db: &PgPool,
        id: SubcategoryId,
    ) -> Result<Subcategory, AppError> {
        sqlx::query_as::<_, Subcategory>(
            "SELECT id, name, category_id, created_at, updated_at FROM subcategories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subcategory not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_subcategory(
        db: &PgPool,
        id: SubcategoryId,
        dto: UpdateSubcategoryDto,
    ) -> Result<Subcategory, AppError> {
        if let Some(category_id) = dto.category_id {
            ensure_exists(db, "categories", "Category", category_id).await?;
        }

        sqlx::query_as::<_, Subcategory>(
            r#"UPDATE subcategories SET
                name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, category_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(dto.category_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subcategory not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_subcategory(db: &PgPool, id: SubcategoryId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subcategory not found")));
        }

        Ok(())
    }
}
