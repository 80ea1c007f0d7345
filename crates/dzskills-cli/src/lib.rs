//! # DZ Skills CLI
//!
//! Account bootstrap and database seeding for DZ Skills development.
//!
//! This library crate provides the functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use dzskills_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::default().with_courses(25);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;

use dzskills_core::hash_password;
use dzskills_models::ids::TeacherId;
use sqlx::PgPool;

/// Creates a teacher account, failing when the username or email is taken.
pub async fn create_teacher(
    db: &PgPool,
    full_name: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<TeacherId, Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let teacher_id = sqlx::query_scalar::<_, TeacherId>(
        "INSERT INTO teachers (full_name, username, email, password)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(full_name)
    .bind(username)
    .bind(email)
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    teacher_id.ok_or_else(|| "A teacher with this username or email already exists".into())
}
