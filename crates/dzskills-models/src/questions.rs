//! Questions students ask on a course, and the answers given to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AnswerId, CourseId, QuestionId, StudentId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub course_id: CourseId,
    pub student_id: StudentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateQuestionDto {
    #[validate(length(min = 1))]
    pub question: String,
    pub course_id: CourseId,
    pub student_id: StudentId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateQuestionDto {
    #[validate(length(min = 1))]
    pub question: String,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Answer {
    pub id: AnswerId,
    pub answer: String,
    pub question_id: QuestionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateAnswerDto {
    #[validate(length(min = 1))]
    pub answer: String,
    pub question_id: QuestionId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateAnswerDto {
    #[validate(length(min = 1))]
    pub answer: String,
}

paginated_response!(PaginatedQuestionsResponse, Question);
paginated_response!(PaginatedAnswersResponse, Answer);
