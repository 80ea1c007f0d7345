use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use dzskills_auth::{Claims, UserRole, verify_token};
use dzskills_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Account id from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    /// Allows the request only when the token belongs to account `id` of `role`.
    pub fn ensure_account(&self, role: UserRole, id: Uuid) -> Result<(), AppError> {
        if self.0.is_account(role, id) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You can only modify your own account".to_string(),
            ))
        }
    }

    /// Allows teachers, and the student who owns the resource.
    pub fn ensure_teacher_or_student(&self, student_id: Uuid) -> Result<(), AppError> {
        if self.0.is_teacher() || self.0.is_account(UserRole::Student, student_id) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Access denied. This resource belongs to another student".to_string(),
            ))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized("request does not contain an access token".to_string())
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token.trim(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that accepts only tokens carrying `$role`.
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;

                if auth_user.role() != $role {
                    return Err(AppError::forbidden(format!(
                        "Access denied. Requires {} role",
                        $role
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireTeacher, UserRole::Teacher);
require_role!(RequireStudent, UserRole::Student);

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: UserRole, id: Uuid) -> AuthUser {
        AuthUser(Claims {
            sub: id.to_string(),
            username: "tester".to_string(),
            email: "tester@dzskills.dz".to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(auth_user(UserRole::Teacher, id).user_id().unwrap(), id);
    }

    #[test]
    fn test_ensure_account() {
        let id = Uuid::new_v4();
        let user = auth_user(UserRole::Student, id);

        assert!(user.ensure_account(UserRole::Student, id).is_ok());
        let err = user.ensure_account(UserRole::Teacher, id).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert!(user.ensure_account(UserRole::Student, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_ensure_teacher_or_student() {
        let owner = Uuid::new_v4();

        assert!(auth_user(UserRole::Teacher, Uuid::new_v4())
            .ensure_teacher_or_student(owner)
            .is_ok());
        assert!(auth_user(UserRole::Student, owner)
            .ensure_teacher_or_student(owner)
            .is_ok());
        assert!(auth_user(UserRole::Student, Uuid::new_v4())
            .ensure_teacher_or_student(owner)
            .is_err());
    }
}
