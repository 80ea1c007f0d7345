//! Teacher accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::TeacherId;
use crate::paginated_response;

/// A teacher as returned by the API. The password hash is never selected
/// into this struct.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub picture: Option<String>,
    pub skills: Option<String>,
    pub degrees: Option<String>,
    pub experience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub picture: Option<String>,
    pub skills: Option<String>,
    pub degrees: Option<String>,
    pub experience: Option<String>,
}

/// Partial update. A new password is rehashed; omitted fields are kept.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(length(min = 3, max = 100))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    pub picture: Option<String>,
    pub skills: Option<String>,
    pub degrees: Option<String>,
    pub experience: Option<String>,
}

paginated_response!(PaginatedTeachersResponse, Teacher);

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateTeacherDto {
        CreateTeacherDto {
            full_name: "Yacine Brahimi".to_string(),
            username: "yacine".to_string(),
            email: "yacine@dzskills.dz".to_string(),
            password: "password123".to_string(),
            picture: None,
            skills: Some("Rust, SQL".to_string()),
            degrees: None,
            experience: None,
        }
    }

    #[test]
    fn test_create_teacher_valid() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_teacher_rejects_short_password() {
        let dto = CreateTeacherDto {
            password: "short".to_string(),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_teacher_rejects_bad_email() {
        let dto = CreateTeacherDto {
            email: "not-an-email".to_string(),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_teacher_all_none_is_valid() {
        let dto: UpdateTeacherDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
    }
}
