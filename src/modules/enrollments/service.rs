use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{info, instrument};

use dzskills_core::{AppError, PaginationMeta, PaginationParams};
use dzskills_models::ids::{CourseId, ExamQuizId, StudentId};

use crate::metrics::{track_certificate_issued, track_enrollment_created, track_exam_submission};
use crate::utils::db::{ensure_exists, map_db_error};

use super::model::{
    CreateEnrollmentDto, Enrollment, ExamResult, PaginatedEnrollmentsResponse, SubmitExamDto,
    UpdateEnrollmentDto, certificate_code, grade_exam,
};

const ENROLLMENT_COLUMNS: &str =
    "student_id, course_id, grade, enrolled_at, certificate, issued, graded_at, updated_at";

fn enrollment_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Enrollment not found"))
}

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "enrollments"))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        ensure_exists(db, "students", "Student", dto.student_id).await?;
        ensure_exists(db, "courses", "Course", dto.course_id).await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, course_id)
             VALUES ($1, $2)
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        track_enrollment_created();

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaginatedEnrollmentsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments")
            .fetch_one(db)
            .await?;

        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             ORDER BY enrolled_at DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedEnrollmentsResponse {
            data: enrollments,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_enrollments_by_student(
        db: &PgPool,
        student_id: StudentId,
        pagination: PaginationParams,
    ) -> Result<PaginatedEnrollmentsResponse, AppError> {
        ensure_exists(db, "students", "Student", student_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE student_id = $1")
                .bind(student_id)
                .fetch_one(db)
                .await?;

        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1
             ORDER BY enrolled_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(student_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedEnrollmentsResponse {
            data: enrollments,
            meta: PaginationMeta::from_params(&pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_enrollment(
        db: &PgPool,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1 AND course_id = $2"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(enrollment_not_found)
    }

    /// Updates grade and certificate state. `issued` always mirrors whether
    /// a certificate is stored; see [`UpdateEnrollmentDto::resolve_certificate`].
    #[instrument(skip(db))]
    pub async fn update_enrollment(
        db: &PgPool,
        student_id: StudentId,
        course_id: CourseId,
        dto: UpdateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        let mut tx = db.begin().await?;

        let current = sqlx::query_scalar::<_, Option<String>>(
            "SELECT certificate FROM enrollments
             WHERE student_id = $1 AND course_id = $2
             FOR UPDATE",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(enrollment_not_found)?;

        let (certificate, issued) = dto
            .resolve_certificate(current.as_deref())
            .map_err(|msg| AppError::bad_request(anyhow::anyhow!(msg)))?;

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "UPDATE enrollments SET
                grade = COALESCE($3, grade),
                certificate = $4,
                issued = $5,
                updated_at = NOW()
             WHERE student_id = $1 AND course_id = $2
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(course_id)
        .bind(&dto.grade)
        .bind(&certificate)
        .bind(issued)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn delete_enrollment(
        db: &PgPool,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE student_id = $1 AND course_id = $2")
                .bind(student_id)
                .bind(course_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(enrollment_not_found());
        }

        Ok(())
    }

    /// Grades an exam submission and stores the result on the enrollment.
    ///
    /// The enrollment row is locked for the whole transaction, so two
    /// concurrent submissions for the same enrollment are graded one after
    /// the other. Only quizzes of the exam attached to `course_id` count; an
    /// answer for any other quiz fails the whole submission with a 404.
    #[instrument(
        skip(db, dto),
        fields(student.id = %student_id, course.id = %course_id, db.table = "enrollments")
    )]
    pub async fn submit_exam(
        db: &PgPool,
        student_id: StudentId,
        course_id: CourseId,
        dto: SubmitExamDto,
    ) -> Result<ExamResult, AppError> {
        dto.check_shape()
            .map_err(|msg| AppError::bad_request(anyhow::anyhow!(msg)))?;

        let mut tx = db.begin().await?;

        let locked = sqlx::query_scalar::<_, StudentId>(
            "SELECT student_id FROM enrollments
             WHERE student_id = $1 AND course_id = $2
             FOR UPDATE",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(enrollment_not_found());
        }

        let quiz_ids = dto.quiz_ids();
        let correct: HashMap<ExamQuizId, i16> = sqlx::query_as::<_, (ExamQuizId, i16)>(
            "SELECT eq.id, eq.answer
             FROM exam_quizzes eq
             JOIN exams e ON e.id = eq.exam_id
             WHERE e.course_id = $1 AND eq.id = ANY($2)",
        )
        .bind(course_id)
        .bind(&quiz_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        if let Some(missing) = quiz_ids.iter().find(|id| !correct.contains_key(*id)) {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Exam quiz not found: {}",
                missing
            )));
        }

        let outcome = grade_exam(&dto.answers, &correct);
        let certificate = outcome.passed.then(certificate_code);

        sqlx::query(
            "UPDATE enrollments SET
                grade = $3,
                certificate = $4,
                issued = $5,
                graded_at = NOW(),
                updated_at = NOW()
             WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(&outcome.grade)
        .bind(&certificate)
        .bind(certificate.is_some())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        track_exam_submission(outcome.passed);
        if certificate.is_some() {
            track_certificate_issued();
        }

        info!(grade = %outcome.grade, passed = outcome.passed, "Exam graded");

        Ok(ExamResult::new(outcome, certificate))
    }
}
