//! Request extractors for authentication and role checks.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the token and exposes its claims
//! 3. [`auth::RequireTeacher`] / [`auth::RequireStudent`] additionally check the role
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireTeacher};
//!
//! // Any valid token
//! async fn get_course(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Teachers only
//! async fn create_course(RequireTeacher(auth_user): RequireTeacher) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
