//! HS256 access tokens.
//!
//! Tokens are signed with `JWT_SECRET` and expire `JWT_ACCESS_EXPIRY`
//! seconds after issue. Verification checks the signature and `exp`; any
//! failure surfaces as a 401.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use dzskills_config::JwtConfig;
use dzskills_core::AppError;

use crate::claims::{Claims, UserRole};

/// Creates a signed access token for an account.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
///
/// ```ignore
/// let token = create_access_token(teacher.id, &teacher.username, &teacher.email, UserRole::Teacher, &jwt_config)?;
/// ```
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error for a bad signature, an expired token, or
/// anything that does not decode into [`Claims`].
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}
