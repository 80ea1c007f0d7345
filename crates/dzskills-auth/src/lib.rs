//! # DZ Skills Auth
//!
//! Bearer token handling for the DZ Skills API.
//!
//! - [`claims`]: the [`Claims`] carried by access tokens and the [`UserRole`] enum
//! - [`jwt`]: HS256 token creation and verification
//!
//! ```ignore
//! use dzskills_auth::{UserRole, create_access_token, verify_token};
//! use dzskills_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "amina", "amina@dzskills.dz", UserRole::Student, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, UserRole::Student);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, UserRole};
pub use jwt::{create_access_token, verify_token};
