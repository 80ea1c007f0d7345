//! Access token claims.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use dzskills_core::AppError;

/// The two kinds of account. Each lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Table holding accounts of this role.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Teacher => "teachers",
            Self::Student => "students",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(AppError::bad_request(anyhow::anyhow!("invalid role specified"))),
        }
    }
}

/// JWT claims for access tokens.
///
/// - `sub`: account id in the table selected by `role`
/// - `username` / `email`: copied at login so handlers need no lookup
/// - `exp` / `iat`: Unix timestamps
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// Parses `sub` into the account id.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// True when the token belongs to the account `id` of kind `role`.
    pub fn is_account(&self, role: UserRole, id: Uuid) -> bool {
        self.role == role && self.user_id().is_ok_and(|sub| sub == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole, sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "amina".to_string(),
            email: "amina@dzskills.dz".to_string(),
            role,
            exp: 1234567890,
            iat: 1234567800,
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Teacher).unwrap(), r#""teacher""#);
        let role: UserRole = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        let err = "admin".parse::<UserRole>().unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "invalid role specified");
    }

    #[test]
    fn test_claims_round_trip_json() {
        let json = r#"{"sub":"abc","username":"u","email":"e@x.dz","role":"teacher","exp":10,"iat":5}"#;
        let c: Claims = serde_json::from_str(json).unwrap();
        assert!(c.is_teacher());
        assert!(!c.is_student());
        assert_eq!(c.exp, 10);
    }

    #[test]
    fn test_user_id_parsing() {
        let id = Uuid::new_v4();
        assert_eq!(claims(UserRole::Student, &id.to_string()).user_id().unwrap(), id);
        assert!(claims(UserRole::Student, "not-a-uuid").user_id().is_err());
    }

    #[test]
    fn test_is_account_checks_role_and_id() {
        let id = Uuid::new_v4();
        let c = claims(UserRole::Student, &id.to_string());
        assert!(c.is_account(UserRole::Student, id));
        assert!(!c.is_account(UserRole::Teacher, id));
        assert!(!c.is_account(UserRole::Student, Uuid::new_v4()));
    }
}
