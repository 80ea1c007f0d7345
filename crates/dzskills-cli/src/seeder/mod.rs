//! Database seeding for local development.
//!
//! # Module Structure
//!
//! - [`accounts`] - teacher and student generation and insertion
//! - [`catalog`] - categories and courses
//! - [`models`] - seed rows and configuration
//!
//! # Performance
//!
//! - Parallel data generation (and password hashing) using Rayon
//! - Batch inserts with multi-value INSERT statements
//! - bcrypt cost 4 for seeded accounts

pub mod accounts;
pub mod catalog;
pub mod models;

pub use accounts::SEED_PASSWORD;
pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;

/// Seeds teachers, students, categories and courses.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!(
        "   - Accounts: {} teachers, {} students",
        config.teachers, config.students
    );
    println!(
        "   - Catalog: {} categories, {} courses",
        config.categories, config.courses
    );

    let teacher_ids = accounts::seed_teachers(db, config.teachers).await?;
    let student_ids = accounts::seed_students(db, config.students).await?;
    let category_ids = catalog::seed_categories(db, config.categories).await?;

    let course_ids = if config.can_seed_courses() {
        catalog::seed_courses(db, config.courses, &teacher_ids, &category_ids).await?
    } else {
        println!("   ⚠ Skipping courses: they need at least one teacher and one category");
        Vec::new()
    };

    println!(
        "\n✅ Seeding complete! Created {} teachers, {} students, {} categories, {} courses in {:?}",
        teacher_ids.len(),
        student_ids.len(),
        category_ids.len(),
        course_ids.len(),
        start_time.elapsed()
    );
    println!("\n📝 Default password for all accounts: {}", SEED_PASSWORD);

    Ok(())
}

/// Empties every table. Accounts and categories cascade to the rest.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all data...");

    sqlx::query("TRUNCATE teachers, students, categories CASCADE")
        .execute(db)
        .await?;

    println!("✅ All data cleared in {:?}", start_time.elapsed());
    Ok(())
}
