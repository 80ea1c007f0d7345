mod common;

use axum::http::StatusCode;
use common::{create_test_student, create_test_teacher, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_teacher(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/teachers",
        None,
        Some(json!({
            "full_name": "Yacine Benali",
            "username": "yacine",
            "email": "yacine@dzskills.dz",
            "password": "password123",
            "skills": "Rust, Go"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "yacine");
    assert_eq!(body["skills"], "Rust, Go");
    assert!(body.get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": "yacine",
            "password": "password123",
            "role": "teacher"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let existing = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        None,
        Some(json!({
            "full_name": "Someone Else",
            "username": "someone_else",
            "email": existing.email,
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        None,
        Some(json!({
            "full_name": "Amina",
            "username": "amina",
            "email": "amina@dzskills.dz",
            "password": "short"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "password must be at least 8 characters");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_and_get_students(pool: PgPool) {
    let student = create_test_student(&pool).await;
    create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/students?limit=1", Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["limit"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/students/{}", student.id);
    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], student.email);
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_missing_teacher(pool: PgPool) {
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/teachers/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, Some(&teacher.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Teacher not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_account_only(pool: PgPool) {
    let teacher = create_test_teacher(&pool).await;
    let other = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/teachers/{}", other.id);
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&teacher.token),
        Some(json!({ "experience": "10 years" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/teachers/{}", teacher.id);
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&teacher.token),
        Some(json!({ "experience": "10 years" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experience"], "10 years");
    assert_eq!(body["username"], teacher.username);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_change_takes_effect(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/students/{}", student.id);
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&student.token),
        Some(json!({ "password": "a-brand-new-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login = |password: &'static str| {
        json!({
            "identifier": student.email.clone(),
            "password": password,
            "role": "student"
        })
    };

    let (status, _) = send(&app, "POST", "/api/auth/login", None, Some(login(common::TEST_PASSWORD))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", "/api/auth/login", None, Some(login("a-brand-new-password"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_own_student_account(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/students/{}", student.id);

    let (status, _) = send(&app, "DELETE", &uri, Some(&teacher.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "DELETE", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (status, _) = send(&app, "GET", &uri, Some(&teacher.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
