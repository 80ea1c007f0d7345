//! Login request and response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub use dzskills_auth::{Claims, UserRole};

/// Credentials for either account kind.
///
/// `identifier` matches the account's email or username. `role` is kept as
/// text so an unknown value can be answered with a plain 400.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "identifier is required"))]
    #[schema(example = "amina@dzskills.dz")]
    pub identifier: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
    #[schema(example = "student")]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: UserRole,
    pub user_id: Uuid,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_identifier() {
        let req = LoginRequest {
            identifier: String::new(),
            password: "password123".to_string(),
            role: "teacher".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_response_serializes_role_lowercase() {
        let resp = LoginResponse {
            token: "t".to_string(),
            username: "amina".to_string(),
            role: UserRole::Student,
            user_id: Uuid::nil(),
            expires_in: 3600,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["expires_in"], 3600);
    }
}
