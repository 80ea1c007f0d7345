//! # DZ Skills Models
//!
//! Database rows, request DTOs and response envelopes for the DZ Skills API.
//!
//! Row structs derive `sqlx::FromRow` and `Serialize`; request DTOs derive
//! `Deserialize` and `validator::Validate`; everything derives `ToSchema` for
//! the OpenAPI document.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID identifiers
//! - [`auth`]: login request/response
//! - [`teachers`] / [`students`]: accounts
//! - [`categories`]: categories and subcategories
//! - [`courses`]: courses, filters and rating summaries
//! - [`articles`] / [`videos`]: course reading and video material
//! - [`quizzes`]: course practice quizzes and graded exam quizzes
//! - [`exams`]: one exam per course
//! - [`questions`]: student questions and their answers
//! - [`feedbacks`] / [`ratings`]: student opinions
//! - [`enrollments`]: enrollment rows and exam grading

pub mod articles;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod feedbacks;
pub mod ids;
pub mod questions;
pub mod quizzes;
pub mod ratings;
pub mod students;
pub mod teachers;
pub mod videos;

use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<Entity> deleted successfully"`
    pub fn deleted(entity: &str) -> Self {
        Self::new(format!("{} deleted successfully", entity))
    }
}

/// Declares a `{data, meta}` list envelope for one row type.
macro_rules! paginated_response {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, serde::Serialize, utoipa::ToSchema)]
        pub struct $name {
            pub data: Vec<$item>,
            pub meta: dzskills_core::PaginationMeta,
        }
    };
}

pub(crate) use paginated_response;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_message() {
        assert_eq!(
            MessageResponse::deleted("Course").message,
            "Course deleted successfully"
        );
    }
}
