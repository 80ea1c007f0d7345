mod common;

use axum::http::StatusCode;
use common::{
    create_test_category, create_test_course, create_test_student, create_test_teacher, enroll,
    send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn course(pool: &PgPool) -> Uuid {
    let teacher = create_test_teacher(pool).await;
    let category_id = create_test_category(pool).await;
    create_test_course(pool, teacher.id, category_id).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rate_course_and_average(pool: PgPool) {
    let course_id = course(&pool).await;
    let amina = create_test_student(&pool).await;
    let karim = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    for (student, rating) in [(&amina, 5), (&karim, 2)] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/ratings",
            Some(&student.token),
            Some(json!({ "course_id": course_id, "student_id": student.id, "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["rating"], rating);
    }

    let uri = format!("/api/courses/{}/ratings/average", course_id);
    let (status, body) = send(&app, "GET", &uri, Some(&amina.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_rating"], 3.5);
    assert_eq!(body["total_ratings"], 2);

    let uri = format!("/api/courses/{}/ratings", course_id);
    let (status, body) = send(&app, "GET", &uri, Some(&amina.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_rating(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);
    let body = json!({ "course_id": course_id, "student_id": student.id, "rating": 4 });

    let (status, _) = send(&app, "POST", "/api/ratings", Some(&student.token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/ratings", Some(&student.token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Student has already rated this course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_on_behalf_of_another_student(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let other = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&student.token),
        Some(json!({ "course_id": course_id, "student_id": other.id, "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_out_of_range(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&student.token),
        Some(json!({ "course_id": course_id, "student_id": student.id, "rating": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "rating must be between 0 and 5");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_rating(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let other = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&student.token),
        Some(json!({ "course_id": course_id, "student_id": student.id, "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/ratings/{}/{}", course_id, student.id);

    let (status, _) = send(&app, "PUT", &uri, Some(&other.token), Some(json!({ "rating": 0 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "PUT", &uri, Some(&student.token), Some(json!({ "rating": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);

    let (status, _) = send(&app, "DELETE", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_feedback_lifecycle(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let other = create_test_student(&pool).await;
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);

    let (status, feedback) = send(
        &app,
        "POST",
        "/api/feedbacks",
        Some(&student.token),
        Some(json!({
            "description": "Great platform",
            "review": 5,
            "student_id": student.id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/feedbacks/{}", feedback["id"].as_str().unwrap());

    let uri_by_student = format!("/api/students/{}/feedbacks", student.id);
    let (status, body) = send(&app, "GET", &uri_by_student, Some(&teacher.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, _) = send(&app, "PUT", &uri, Some(&other.token), Some(json!({ "review": 1 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "PUT", &uri, Some(&student.token), Some(json!({ "review": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["review"], 4);
    assert_eq!(body["description"], "Great platform");

    let (status, _) = send(&app, "DELETE", &uri, Some(&teacher.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrollment_lifecycle(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let teacher = create_test_teacher(&pool).await;
    let app = setup_test_app(pool);
    let body = json!({ "student_id": student.id, "course_id": course_id });

    let (status, enrollment) = send(&app, "POST", "/api/enrollments", Some(&student.token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(enrollment["grade"].is_null());
    assert_eq!(enrollment["issued"], false);

    let (status, body) = send(&app, "POST", "/api/enrollments", Some(&student.token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Student is already enrolled in this course");

    let uri = format!("/api/students/{}/enrollments", student.id);
    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let uri = format!("/api/enrollments/{}/{}", student.id, course_id);

    let (status, _) = send(&app, "PUT", &uri, Some(&student.token), Some(json!({ "grade": "20/20" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "PUT", &uri, Some(&teacher.token), Some(json!({ "grade": "12/20" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "12/20");

    let (status, _) = send(&app, "DELETE", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Enrollment not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_issued_flag_follows_certificate(pool: PgPool) {
    let course_id = course(&pool).await;
    let student = create_test_student(&pool).await;
    let teacher = create_test_teacher(&pool).await;
    enroll(&pool, student.id, course_id).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/enrollments/{}/{}", student.id, course_id);

    let (status, body) = send(&app, "PUT", &uri, Some(&teacher.token), Some(json!({ "issued": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "issued requires a certificate");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&teacher.token),
        Some(json!({ "certificate": "DZS-MANUAL", "issued": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "a certificate cannot be set while issued is false");

    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["certificate"].is_null());
    assert_eq!(body["issued"], false);

    let (status, body) = send(&app, "PUT", &uri, Some(&teacher.token), Some(json!({ "certificate": "DZS-MANUAL" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["certificate"], "DZS-MANUAL");
    assert_eq!(body["issued"], true);

    let (status, body) = send(&app, "PUT", &uri, Some(&teacher.token), Some(json!({ "grade": "11/20" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["certificate"], "DZS-MANUAL");
    assert_eq!(body["issued"], true);

    let (status, body) = send(&app, "PUT", &uri, Some(&teacher.token), Some(json!({ "issued": false }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["certificate"].is_null());
    assert_eq!(body["issued"], false);
    assert_eq!(body["grade"], "11/20");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrollment_in_unknown_course(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrollments",
        Some(&student.token),
        Some(json!({ "student_id": student.id, "course_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}
