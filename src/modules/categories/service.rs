use sqlx::PgPool;
use tracing::instrument;

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::categories::Subcategory;
use dzskills_models::ids::CategoryId;

use crate::utils::db::map_db_error;

use super::model::{Category, CategoryDto, CategoryWithSubcategories, PaginatedCategoriesResponse};

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn create_category(db: &PgPool, dto: CategoryDto) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name)
               VALUES ($1)
               RETURNING id, name, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(category)
    }

    #[instrument(skip(db))]
    pub async fn get_categories(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedCategoriesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(db)
            .await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"SELECT id, name, created_at, updated_at
               FROM categories
               ORDER BY name ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCategoriesResponse {
            data: categories,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    /// The category and every subcategory filed under it, by name.
    #[instrument(skip(db))]
    pub async fn get_category_by_id(
        db: &PgPool,
        id: CategoryId,
    ) -> Result<CategoryWithSubcategories, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        let subcategories = sqlx::query_as::<_, Subcategory>(
            r#"SELECT id, name, category_id, created_at, updated_at
               FROM subcategories
               WHERE category_id = $1
               ORDER BY name ASC"#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(CategoryWithSubcategories::new(category, subcategories))
    }

    #[instrument(skip(db))]
    pub async fn update_category(
        db: &PgPool,
        id: CategoryId,
        dto: CategoryDto,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"UPDATE categories
               SET name = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.name)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))
    }

    /// Deleting a category cascades to its subcategories and courses.
    #[instrument(skip(db))]
    pub async fn delete_category(db: &PgPool, id: CategoryId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        Ok(())
    }
}
