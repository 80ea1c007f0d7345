use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{CategoryId, SubcategoryId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateSubcategoryDto, PaginatedSubcategoriesResponse, Subcategory, UpdateSubcategoryDto,
};
use super::service::SubcategoryService;

#[utoipa::path(
    post,
    path = "/api/subcategories",
    request_body = CreateSubcategoryDto,
    responses(
        (status = 201, description = "Subcategory created", body = Subcategory),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Subcategories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_subcategory(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateSubcategoryDto>,
) -> Result<(StatusCode, Json<Subcategory>), AppError> {
    let subcategory = SubcategoryService::create_subcategory(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(subcategory)))
}

#[utoipa::path(
    get,
    path = "/api/subcategories",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of subcategories", body = PaginatedSubcategoriesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subcategories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subcategories(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedSubcategoriesResponse>, AppError> {
    let subcategories = SubcategoryService::get_subcategories(&state.db, pagination).await?;
    Ok(Json(subcategories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/subcategories",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Subcategories of the category", body = PaginatedSubcategoriesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_category_subcategories(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CategoryId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedSubcategoriesResponse>, AppError> {
    let subcategories =
        SubcategoryService::get_subcategories_by_category(&state.db, id, pagination).await?;
    Ok(Json(subcategories))
}

#[utoipa::path(
    get,
    path = "/api/subcategories/{id}",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory details", body = Subcategory),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "Subcategories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subcategory_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<SubcategoryId>,
) -> Result<Json<Subcategory>, AppError> {
    let subcategory = SubcategoryService::get_subcategory_by_id(&state.db, id).await?;
    Ok(Json(subcategory))
}

#[utoipa::path(
    put,
    path = "/api/subcategories/{id}",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    request_body = UpdateSubcategoryDto,
    responses(
        (status = 200, description = "Subcategory updated", body = Subcategory),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Subcategory or category not found")
    ),
    tag = "Subcategories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_subcategory(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<SubcategoryId>,
    ValidatedJson(dto): ValidatedJson<UpdateSubcategoryDto>,
) -> Result<Json<Subcategory>, AppError> {
    let subcategory = SubcategoryService::update_subcategory(&state.db, id, dto).await?;
    Ok(Json(subcategory))
}

#[utoipa::path(
    delete,
    path = "/api/subcategories/{id}",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "Subcategories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_subcategory(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<SubcategoryId>,
) -> Result<Json<MessageResponse>, AppError> {
    SubcategoryService::delete_subcategory(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Subcategory")))
}
