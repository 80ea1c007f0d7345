//! Multiple choice quizzes.
//!
//! A [`CourseQuiz`] is an ungraded practice question on a course; an
//! [`ExamQuiz`] belongs to the course exam and is scored by the grading
//! workflow. Both carry four options and the 1-based index of the correct one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, CourseQuizId, ExamId, ExamQuizId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct CourseQuiz {
    pub id: CourseQuizId,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    /// Correct option, 1 to 4
    pub answer: i16,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateCourseQuizDto {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub option1: String,
    #[validate(length(min = 1))]
    pub option2: String,
    #[validate(length(min = 1))]
    pub option3: String,
    #[validate(length(min = 1))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "answer must be between 1 and 4"))]
    pub answer: i16,
    pub course_id: CourseId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateCourseQuizDto {
    #[validate(length(min = 1))]
    pub question: Option<String>,
    #[validate(length(min = 1))]
    pub option1: Option<String>,
    #[validate(length(min = 1))]
    pub option2: Option<String>,
    #[validate(length(min = 1))]
    pub option3: Option<String>,
    #[validate(length(min = 1))]
    pub option4: Option<String>,
    #[validate(range(min = 1, max = 4, message = "answer must be between 1 and 4"))]
    pub answer: Option<i16>,
    pub course_id: Option<CourseId>,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct ExamQuiz {
    pub id: ExamQuizId,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    /// Correct option, 1 to 4
    pub answer: i16,
    pub exam_id: ExamId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateExamQuizDto {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub option1: String,
    #[validate(length(min = 1))]
    pub option2: String,
    #[validate(length(min = 1))]
    pub option3: String,
    #[validate(length(min = 1))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "answer must be between 1 and 4"))]
    pub answer: i16,
    pub exam_id: ExamId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateExamQuizDto {
    #[validate(length(min = 1))]
    pub question: Option<String>,
    #[validate(length(min = 1))]
    pub option1: Option<String>,
    #[validate(length(min = 1))]
    pub option2: Option<String>,
    #[validate(length(min = 1))]
    pub option3: Option<String>,
    #[validate(length(min = 1))]
    pub option4: Option<String>,
    #[validate(range(min = 1, max = 4, message = "answer must be between 1 and 4"))]
    pub answer: Option<i16>,
    pub exam_id: Option<ExamId>,
}

paginated_response!(PaginatedCourseQuizzesResponse, CourseQuiz);
paginated_response!(PaginatedExamQuizzesResponse, ExamQuiz);

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_quiz_dto(answer: i16) -> CreateExamQuizDto {
        CreateExamQuizDto {
            question: "Which keyword moves ownership into a closure?".to_string(),
            option1: "ref".to_string(),
            option2: "move".to_string(),
            option3: "static".to_string(),
            option4: "box".to_string(),
            answer,
            exam_id: ExamId::new(),
        }
    }

    #[test]
    fn test_answer_range() {
        assert!(exam_quiz_dto(1).validate().is_ok());
        assert!(exam_quiz_dto(4).validate().is_ok());
        assert!(exam_quiz_dto(0).validate().is_err());
        assert!(exam_quiz_dto(5).validate().is_err());
    }

    #[test]
    fn test_update_answer_range() {
        let dto: UpdateCourseQuizDto = serde_json::from_str(r#"{"answer":7}"#).unwrap();
        assert!(dto.validate().is_err());
        let dto: UpdateCourseQuizDto = serde_json::from_str(r#"{"answer":3}"#).unwrap();
        assert!(dto.validate().is_ok());
    }
}
