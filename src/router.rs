use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde::Serialize;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::answers::init_answers_router;
use crate::modules::articles::init_articles_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::categories::init_categories_router;
use crate::modules::course_quizzes::init_course_quizzes_router;
use crate::modules::courses::init_courses_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::exam_quizzes::init_exam_quizzes_router;
use crate::modules::exams::init_exams_router;
use crate::modules::feedbacks::init_feedbacks_router;
use crate::modules::questions::init_questions_router;
use crate::modules::ratings::init_ratings_router;
use crate::modules::students::init_students_router;
use crate::modules::subcategories::init_subcategories_router;
use crate::modules::teachers::init_teachers_router;
use crate::modules::videos::init_videos_router;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub docs: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "connected")]
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse)),
    tag = "Health"
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the DZ Skills API".to_string(),
        docs: "/swagger-ui".to_string(),
    })
}

/// Liveness plus a database round trip
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: "connected".to_string(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    database: "unreachable".to_string(),
                }),
            )
        }
    }
}

fn api_router(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", init_auth_router(&state.rate_limit_config))
        .nest("/teachers", init_teachers_router())
        .nest("/students", init_students_router())
        .nest("/categories", init_categories_router())
        .nest("/subcategories", init_subcategories_router())
        .nest("/courses", init_courses_router())
        .nest("/articles", init_articles_router())
        .nest("/videos", init_videos_router())
        .nest("/course-quizzes", init_course_quizzes_router())
        .nest("/exams", init_exams_router())
        .nest("/exam-quizzes", init_exam_quizzes_router())
        .nest("/questions", init_questions_router())
        .nest("/answers", init_answers_router())
        .nest("/feedbacks", init_feedbacks_router())
        .nest("/ratings", init_ratings_router())
        .nest("/enrollments", init_enrollments_router());

    if state.rate_limit_config.enabled {
        api.layer(GovernorLayer::new(
            state.rate_limit_config.general_governor_config(),
        ))
    } else {
        api
    }
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest_service("/files", ServeDir::new(state.file_storage.base_dir()))
        .nest("/api", api_router(&state))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
}
