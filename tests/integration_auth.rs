mod common;

use axum::http::StatusCode;
use common::{create_test_student, create_test_teacher, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_login_with_email(pool: PgPool) {
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": teacher.email,
            "password": teacher.password,
            "role": "teacher"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["username"], teacher.username);
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["user_id"], teacher.id.to_string());
    assert_eq!(body["expires_in"], 3600);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_login_with_username(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": student.username,
            "password": student.password,
            "role": "student"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_checks_the_table_of_the_role(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": student.email,
            "password": student.password,
            "role": "teacher"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": teacher.email,
            "password": "wrongpassword",
            "role": "teacher"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_role(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": "someone",
            "password": "password123",
            "role": "admin"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid role specified");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "identifier": "someone", "role": "student" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_claims(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&student.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], student.id.to_string());
    assert_eq!(body["role"], "student");
    assert_eq!(body["email"], student.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/courses", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_and_welcome(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("DZ Skills"));
}
