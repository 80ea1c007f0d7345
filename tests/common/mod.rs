use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dzskills::dzskills_auth::{UserRole, create_access_token};
use dzskills::dzskills_config::{CorsConfig, JwtConfig, RateLimitConfig};
use dzskills::dzskills_core::{LocalFileStorage, hash_password};
use dzskills::router::init_router;
use dzskills::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn test_state(pool: PgPool, rate_limit_config: RateLimitConfig) -> AppState {
    let upload_dir = std::env::temp_dir().join(format!("dzskills-test-{}", Uuid::new_v4()));
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::parse("http://localhost:3000"),
        rate_limit_config,
        file_storage: LocalFileStorage::new(upload_dir, "http://localhost:3000/files".to_string()),
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool, RateLimitConfig::disabled()))
}

#[allow(dead_code)]
pub struct TestAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

async fn create_account(pool: &PgPool, role: UserRole) -> TestAccount {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("{}_{}", role.as_str(), &suffix[..12]);
    let email = format!("{}@test.dz", username);
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let query = format!(
        "INSERT INTO {} (full_name, username, email, password) VALUES ($1, $2, $3, $4) RETURNING id",
        role.table()
    );
    let id: Uuid = sqlx::query_scalar(&query)
        .bind("Test Account")
        .bind(&username)
        .bind(&email)
        .bind(&hashed)
        .fetch_one(pool)
        .await
        .unwrap();

    let token = create_access_token(id, &username, &email, role, &test_jwt_config()).unwrap();

    TestAccount {
        id,
        username,
        email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

#[allow(dead_code)]
pub async fn create_test_teacher(pool: &PgPool) -> TestAccount {
    create_account(pool, UserRole::Teacher).await
}

#[allow(dead_code)]
pub async fn create_test_student(pool: &PgPool) -> TestAccount {
    create_account(pool, UserRole::Student).await
}

#[allow(dead_code)]
pub async fn create_test_category(pool: &PgPool) -> Uuid {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(format!("Category {}", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, teacher_id: Uuid, category_id: Uuid) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO courses (name, teacher_id, category_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Rust for Beginners")
    .bind(teacher_id)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn enroll(pool: &PgPool, student_id: Uuid, course_id: Uuid) {
    sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)")
        .bind(student_id)
        .bind(course_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Creates the course exam with `count` quizzes. The correct option cycles
/// through 1..=4. Returns `(quiz_id, correct_answer)` pairs.
#[allow(dead_code)]
pub async fn create_test_exam(pool: &PgPool, course_id: Uuid, count: usize) -> Vec<(Uuid, i16)> {
    let exam_id: Uuid = sqlx::query_scalar(
        "INSERT INTO exams (description, course_id) VALUES ($1, $2) RETURNING id",
    )
    .bind("Final exam")
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let mut quizzes = Vec::with_capacity(count);
    for i in 0..count {
        let answer = (i % 4) as i16 + 1;
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO exam_quizzes (question, option1, option2, option3, option4, answer, exam_id)
             VALUES ($1, 'a', 'b', 'c', 'd', $2, $3)
             RETURNING id",
        )
        .bind(format!("Question {}", i + 1))
        .bind(answer)
        .bind(exam_id)
        .fetch_one(pool)
        .await
        .unwrap();
        quizzes.push((id, answer));
    }

    quizzes
}

/// Sends one request and returns the status with the JSON body
/// (`Value::Null` when the body is empty).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
