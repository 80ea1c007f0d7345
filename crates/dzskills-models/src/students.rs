//! Student accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::StudentId;
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub picture: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(length(min = 3, max = 100))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    pub picture: Option<String>,
}

paginated_response!(PaginatedStudentsResponse, Student);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_validation() {
        let dto = CreateStudentDto {
            full_name: "Amina Kaci".to_string(),
            username: "amina".to_string(),
            email: "amina@dzskills.dz".to_string(),
            password: "password123".to_string(),
            picture: None,
        };
        assert!(dto.validate().is_ok());

        let dto = CreateStudentDto {
            username: "am".to_string(),
            ..dto
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("username"));
    }

    #[test]
    fn test_update_student_validates_present_fields_only() {
        let dto: UpdateStudentDto = serde_json::from_str(r#"{"email":"nope"}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateStudentDto = serde_json::from_str(r#"{"full_name":"Amina K."}"#).unwrap();
        assert!(dto.validate().is_ok());
    }
}
