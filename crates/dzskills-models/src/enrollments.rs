//! Enrollments and exam grading.
//!
//! An enrollment links a student to a course and carries the outcome of the
//! course exam. Grading is split in two: [`grade_exam`] is the pure scoring
//! step, the service wraps it in a transaction that loads the correct answers
//! and stores the result.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::ids::{CourseId, ExamQuizId, StudentId};
use crate::paginated_response;

/// Number of answers an exam submission must contain.
pub const EXAM_QUESTION_COUNT: usize = 20;

/// Minimum score that passes the exam and issues a certificate.
pub const PASS_THRESHOLD: usize = 10;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// `"<score>/20"` once the exam has been graded
    pub grade: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub certificate: Option<String>,
    pub issued: bool,
    pub graded_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateEnrollmentDto {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

/// Manual correction of an enrollment's exam state.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateEnrollmentDto {
    #[validate(length(min = 1, max = 10))]
    pub grade: Option<String>,
    #[validate(length(min = 1))]
    pub certificate: Option<String>,
    pub issued: Option<bool>,
}

impl UpdateEnrollmentDto {
    /// Certificate and `issued` flag after applying this update to a row
    /// currently holding `current`.
    ///
    /// `issued` is true exactly when a certificate is stored: a new
    /// certificate issues it, `issued = false` revokes it, and
    /// `issued = true` needs a certificate in the body or on the row.
    pub fn resolve_certificate(
        &self,
        current: Option<&str>,
    ) -> Result<(Option<String>, bool), String> {
        match (&self.certificate, self.issued) {
            (Some(_), Some(false)) => {
                Err("a certificate cannot be set while issued is false".to_string())
            }
            (Some(certificate), _) => Ok((Some(certificate.clone()), true)),
            (None, Some(false)) => Ok((None, false)),
            (None, Some(true)) => current
                .map(|c| (Some(c.to_string()), true))
                .ok_or_else(|| "issued requires a certificate".to_string()),
            (None, None) => Ok((current.map(str::to_string), current.is_some())),
        }
    }
}

/// One answered exam question.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct ExamAnswer {
    pub quiz_id: ExamQuizId,
    #[validate(range(min = 1, max = 4, message = "answer must be between 1 and 4"))]
    pub answer: i16,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct SubmitExamDto {
    #[validate(nested)]
    pub answers: Vec<ExamAnswer>,
}

impl SubmitExamDto {
    /// Checks the answer count and rejects repeated quiz ids.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.answers.len() != EXAM_QUESTION_COUNT {
            return Err(format!(
                "exactly {} answers are required, got {}",
                EXAM_QUESTION_COUNT,
                self.answers.len()
            ));
        }

        let mut seen = HashSet::with_capacity(self.answers.len());
        for answer in &self.answers {
            if !seen.insert(answer.quiz_id) {
                return Err(format!("duplicate answer for quiz {}", answer.quiz_id));
            }
        }

        Ok(())
    }

    pub fn quiz_ids(&self) -> Vec<ExamQuizId> {
        self.answers.iter().map(|a| a.quiz_id).collect()
    }
}

/// Scored exam, before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamOutcome {
    pub score: usize,
    pub total: usize,
    pub grade: String,
    pub passed: bool,
}

/// Scores `answers` against the correct option of each quiz.
///
/// Answers for quizzes missing from `correct` score nothing; the caller is
/// expected to have rejected those already.
pub fn grade_exam(answers: &[ExamAnswer], correct: &HashMap<ExamQuizId, i16>) -> ExamOutcome {
    let score = answers
        .iter()
        .filter(|a| correct.get(&a.quiz_id) == Some(&a.answer))
        .count();

    ExamOutcome {
        score,
        total: EXAM_QUESTION_COUNT,
        grade: format!("{}/{}", score, EXAM_QUESTION_COUNT),
        passed: score >= PASS_THRESHOLD,
    }
}

/// Fresh certificate code, `DZS-` followed by a random UUID.
pub fn certificate_code() -> String {
    format!("DZS-{}", Uuid::new_v4())
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct ExamResult {
    #[schema(example = "14/20")]
    pub grade: String,
    pub score: usize,
    pub total: usize,
    pub passed: bool,
    pub certificate_issued: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

impl ExamResult {
    pub fn new(outcome: ExamOutcome, certificate: Option<String>) -> Self {
        Self {
            grade: outcome.grade,
            score: outcome.score,
            total: outcome.total,
            passed: outcome.passed,
            certificate_issued: certificate.is_some(),
            certificate,
        }
    }
}

paginated_response!(PaginatedEnrollmentsResponse, Enrollment);

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds 20 quizzes whose correct option is always 1, and a submission
    /// that gets the first `right` of them correct.
    fn exam(right: usize) -> (Vec<ExamAnswer>, HashMap<ExamQuizId, i16>) {
        let mut correct = HashMap::new();
        let mut answers = Vec::new();
        for i in 0..EXAM_QUESTION_COUNT {
            let id = ExamQuizId::new();
            correct.insert(id, 1);
            answers.push(ExamAnswer {
                quiz_id: id,
                answer: if i < right { 1 } else { 2 },
            });
        }
        (answers, correct)
    }

    #[test]
    fn test_perfect_score() {
        let (answers, correct) = exam(20);
        let outcome = grade_exam(&answers, &correct);
        assert_eq!(outcome.score, 20);
        assert_eq!(outcome.grade, "20/20");
        assert!(outcome.passed);
    }

    #[test]
    fn test_pass_threshold_is_inclusive() {
        let (answers, correct) = exam(10);
        let outcome = grade_exam(&answers, &correct);
        assert_eq!(outcome.grade, "10/20");
        assert!(outcome.passed);

        let (answers, correct) = exam(9);
        let outcome = grade_exam(&answers, &correct);
        assert_eq!(outcome.grade, "9/20");
        assert!(!outcome.passed);
    }

    #[test]
    fn test_zero_score() {
        let (answers, correct) = exam(0);
        let outcome = grade_exam(&answers, &correct);
        assert_eq!(
            outcome,
            ExamOutcome {
                score: 0,
                total: 20,
                grade: "0/20".to_string(),
                passed: false,
            }
        );
    }

    #[test]
    fn test_unknown_quiz_scores_nothing() {
        let (mut answers, correct) = exam(20);
        answers[0].quiz_id = ExamQuizId::new();
        assert_eq!(grade_exam(&answers, &correct).score, 19);
    }

    #[test]
    fn test_check_shape_counts_answers() {
        let (answers, _) = exam(20);
        let dto = SubmitExamDto {
            answers: answers[..19].to_vec(),
        };
        assert!(dto.check_shape().unwrap_err().contains("exactly 20"));

        let dto = SubmitExamDto { answers };
        assert!(dto.check_shape().is_ok());
    }

    #[test]
    fn test_check_shape_rejects_duplicates() {
        let (mut answers, _) = exam(20);
        answers[5].quiz_id = answers[4].quiz_id;
        let dto = SubmitExamDto { answers };
        assert!(dto.check_shape().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_submission_validates_answer_range() {
        let (mut answers, _) = exam(20);
        answers[0].answer = 9;
        let dto = SubmitExamDto { answers };
        assert!(dto.validate().is_err());
    }

    fn update(certificate: Option<&str>, issued: Option<bool>) -> UpdateEnrollmentDto {
        UpdateEnrollmentDto {
            grade: None,
            certificate: certificate.map(str::to_string),
            issued,
        }
    }

    #[test]
    fn test_issued_requires_a_certificate() {
        let err = update(None, Some(true)).resolve_certificate(None).unwrap_err();
        assert_eq!(err, "issued requires a certificate");

        let (certificate, issued) = update(None, Some(true))
            .resolve_certificate(Some("DZS-1"))
            .unwrap();
        assert_eq!(certificate.as_deref(), Some("DZS-1"));
        assert!(issued);
    }

    #[test]
    fn test_revoking_clears_the_certificate() {
        let resolved = update(None, Some(false)).resolve_certificate(Some("DZS-1"));
        assert_eq!(resolved, Ok((None, false)));

        assert!(
            update(Some("DZS-2"), Some(false))
                .resolve_certificate(None)
                .is_err()
        );
    }

    #[test]
    fn test_new_certificate_is_issued() {
        let resolved = update(Some("DZS-2"), None).resolve_certificate(None);
        assert_eq!(resolved, Ok((Some("DZS-2".to_string()), true)));
    }

    #[test]
    fn test_grade_only_update_keeps_certificate_state() {
        assert_eq!(
            update(None, None).resolve_certificate(Some("DZS-1")),
            Ok((Some("DZS-1".to_string()), true))
        );
        assert_eq!(update(None, None).resolve_certificate(None), Ok((None, false)));
    }

    #[test]
    fn test_certificate_code_format() {
        let code = certificate_code();
        assert!(code.starts_with("DZS-"));
        assert!(Uuid::parse_str(&code[4..]).is_ok());
        assert_ne!(code, certificate_code());
    }

    #[test]
    fn test_exam_result_hides_missing_certificate() {
        let (answers, correct) = exam(3);
        let result = ExamResult::new(grade_exam(&answers, &correct), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["certificate_issued"], false);
        assert!(json.get("certificate").is_none());
    }
}
