//! # DZ Skills Core
//!
//! Core types, errors, and utilities shared by every DZ Skills crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination query parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`file_storage`]: Storage abstraction for uploaded course images
//! - [`serde`]: Custom deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use dzskills_core::errors::AppError;
//! use dzskills_core::pagination::PaginationParams;
//! use dzskills_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("secure_password")?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
