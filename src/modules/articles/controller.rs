use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::{ArticleId, CourseId};

use crate::middleware::auth::{AuthUser, RequireTeacher};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Article, CreateArticleDto, PaginatedArticlesResponse, UpdateArticleDto};
use super::service::ArticleService;

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleDto,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_article(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateArticleDto>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    let article = ArticleService::create_article(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/articles",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of articles", body = PaginatedArticlesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_articles(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedArticlesResponse>, AppError> {
    let articles = ArticleService::get_articles(&state.db, pagination).await?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/articles",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Articles of the course", body = PaginatedArticlesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_articles(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedArticlesResponse>, AppError> {
    let articles = ArticleService::get_articles_by_course(&state.db, id, pagination).await?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article details", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found")
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_article_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<ArticleId>,
) -> Result<Json<Article>, AppError> {
    let article = ArticleService::get_article_by_id(&state.db, id).await?;
    Ok(Json(article))
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    request_body = UpdateArticleDto,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Article or course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn update_article(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ArticleId>,
    ValidatedJson(dto): ValidatedJson<UpdateArticleDto>,
) -> Result<Json<Article>, AppError> {
    let article = ArticleService::update_article(&state.db, id, dto).await?;
    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires teacher role"),
        (status = 404, description = "Article not found")
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_article(
    State(state): State<AppState>,
    _teacher: RequireTeacher,
    Path(id): Path<ArticleId>,
) -> Result<Json<MessageResponse>, AppError> {
    ArticleService::delete_article(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Article")))
}
