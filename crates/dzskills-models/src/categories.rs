//! Course categories and their subcategories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CategoryId, SubcategoryId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category together with every subcategory filed under it.
#[derive(Serialize, Debug, ToSchema)]
pub struct CategoryWithSubcategories {
    pub id: CategoryId,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryWithSubcategories {
    pub fn new(category: Category, subcategories: Vec<Subcategory>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            subcategories,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Body for both creating and renaming a category.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CategoryDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateSubcategoryDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category_id: CategoryId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateSubcategoryDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}

paginated_response!(PaginatedCategoriesResponse, Category);
paginated_response!(PaginatedSubcategoriesResponse, Subcategory);
