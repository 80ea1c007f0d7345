use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::CategoryId;

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Category, CategoryDto, CategoryWithSubcategories, PaginatedCategoriesResponse};
use super::service::CategoryService;

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 409, description = "Category with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_category(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of categories", body = PaginatedCategoriesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_categories(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedCategoriesResponse>, AppError> {
    let categories = CategoryService::get_categories(&state.db, pagination).await?;
    Ok(Json(categories))
}

/// Category details, including its subcategories
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with subcategories", body = CategoryWithSubcategories),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_category_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryWithSubcategories>, AppError> {
    let category = CategoryService::get_category_by_id(&state.db, id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category renamed", body = Category),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category with this name already exists")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_category(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CategoryId>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::update_category(&state.db, id, dto).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_category(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<CategoryId>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::delete_category(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Category")))
}
