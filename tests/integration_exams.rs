mod common;

use axum::http::StatusCode;
use common::{
    create_test_category, create_test_course, create_test_exam, create_test_student,
    create_test_teacher, enroll, send, setup_test_app,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

/// Answers every quiz, getting the first `right` of them correct.
fn submission(quizzes: &[(Uuid, i16)], right: usize) -> Value {
    let answers: Vec<Value> = quizzes
        .iter()
        .enumerate()
        .map(|(i, (id, correct))| {
            let answer = if i < right { *correct } else { correct % 4 + 1 };
            json!({ "quiz_id": id, "answer": answer })
        })
        .collect();
    json!({ "answers": answers })
}

struct ExamFixture {
    course_id: Uuid,
    quizzes: Vec<(Uuid, i16)>,
}

async fn exam_fixture(pool: &PgPool) -> ExamFixture {
    let teacher = create_test_teacher(pool).await;
    let category_id = create_test_category(pool).await;
    let course_id = create_test_course(pool, teacher.id, category_id).await;
    let quizzes = create_test_exam(pool, course_id, 20).await;
    ExamFixture { course_id, quizzes }
}

fn exam_uri(student_id: Uuid, course_id: Uuid) -> String {
    format!("/api/enrollments/{}/{}/exam", student_id, course_id)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_passing_exam_issues_certificate(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(submission(&fixture.quizzes, 15)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "15/20");
    assert_eq!(body["score"], 15);
    assert_eq!(body["total"], 20);
    assert_eq!(body["passed"], true);
    assert_eq!(body["certificate_issued"], true);
    let certificate = body["certificate"].as_str().unwrap().to_string();
    assert!(certificate.starts_with("DZS-"));

    let (grade, stored, issued): (Option<String>, Option<String>, bool) = sqlx::query_as(
        "SELECT grade, certificate, issued FROM enrollments WHERE student_id = $1 AND course_id = $2",
    )
    .bind(student.id)
    .bind(fixture.course_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(grade.as_deref(), Some("15/20"));
    assert_eq!(stored.as_deref(), Some(certificate.as_str()));
    assert!(issued);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failing_exam_has_no_certificate(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(submission(&fixture.quizzes, 9)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "9/20");
    assert_eq!(body["passed"], false);
    assert_eq!(body["certificate_issued"], false);
    assert!(body.get("certificate").is_none());

    let uri = format!("/api/enrollments/{}/{}", student.id, fixture.course_id);
    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "9/20");
    assert_eq!(body["issued"], false);
    assert!(body["certificate"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resubmission_overwrites_grade(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool.clone());
    let uri = exam_uri(student.id, fixture.course_id);

    let (status, _) = send(&app, "POST", &uri, Some(&student.token), Some(submission(&fixture.quizzes, 20))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", &uri, Some(&student.token), Some(submission(&fixture.quizzes, 4))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "4/20");

    let (certificate, issued): (Option<String>, bool) = sqlx::query_as(
        "SELECT certificate, issued FROM enrollments WHERE student_id = $1 AND course_id = $2",
    )
    .bind(student.id)
    .bind(fixture.course_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(certificate.is_none());
    assert!(!issued);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrong_answer_count_is_rejected(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(submission(&fixture.quizzes[..19], 19)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "exactly 20 answers are required, got 19");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_answer_out_of_range_is_rejected(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool);

    let mut body = submission(&fixture.quizzes, 20);
    body["answers"][0]["answer"] = json!(7);

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "answer must be between 1 and 4");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_the_enrolled_student_can_submit(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    let other = create_test_student(&pool).await;
    let teacher = create_test_teacher(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool);
    let uri = exam_uri(student.id, fixture.course_id);

    let (status, body) = send(&app, "POST", &uri, Some(&other.token), Some(submission(&fixture.quizzes, 20))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only submit exams for your own enrollments");

    let (status, _) = send(&app, "POST", &uri, Some(&teacher.token), Some(submission(&fixture.quizzes, 20))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "POST", &uri, None, Some(submission(&fixture.quizzes, 20))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_submission_for_another_student_is_forbidden(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    let other = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool);

    let mut body = submission(&fixture.quizzes, 20);
    body["answers"][0]["answer"] = json!(7);

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&other.token),
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only submit exams for your own enrollments");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submission_without_enrollment(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(submission(&fixture.quizzes, 20)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Enrollment not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_quiz_from_another_course_leaves_enrollment_untouched(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let elsewhere = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    enroll(&pool, student.id, fixture.course_id).await;
    let app = setup_test_app(pool.clone());

    let mut quizzes = fixture.quizzes.clone();
    quizzes[3] = elsewhere.quizzes[3];

    let (status, body) = send(
        &app,
        "POST",
        &exam_uri(student.id, fixture.course_id),
        Some(&student.token),
        Some(submission(&quizzes, 20)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        format!("Exam quiz not found: {}", elsewhere.quizzes[3].0)
    );

    let (grade, graded_at): (Option<String>, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as(
            "SELECT grade, graded_at FROM enrollments WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student.id)
        .bind(fixture.course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(grade.is_none());
    assert!(graded_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exam_quizzes_listed_by_exam(pool: PgPool) {
    let fixture = exam_fixture(&pool).await;
    let student = create_test_student(&pool).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/courses/{}/exam", fixture.course_id);
    let (status, exam) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exam["course_id"], fixture.course_id.to_string());

    let uri = format!("/api/exams/{}/quizzes?limit=100", exam["id"].as_str().unwrap());
    let (status, body) = send(&app, "GET", &uri, Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 20);
}
