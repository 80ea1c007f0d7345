//! Category and course seeding.

use std::time::Instant;

use dzskills_models::ids::{CategoryId, CourseId, TeacherId};
use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use fake::faker::lorem::en::Paragraph;
use rayon::prelude::*;
use sqlx::PgPool;

use super::models::CourseSeed;

const LANGUAGES: &[&str] = &["Arabic", "French", "English", "Tamazight"];
const LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

fn pick<'a>(options: &[&'a str]) -> &'a str {
    options[(0..options.len()).fake::<usize>()]
}

/// Category names carry their index so the unique constraint never trips.
pub fn generate_category_names(count: usize) -> Vec<String> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let word: String = Buzzword().fake();
            format!("{} {}", capitalize(&word), idx + 1)
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Spreads `count` courses round-robin over the given teachers and categories.
pub fn generate_courses(
    count: usize,
    teacher_ids: &[TeacherId],
    category_ids: &[CategoryId],
) -> Vec<CourseSeed> {
    if teacher_ids.is_empty() || category_ids.is_empty() {
        return Vec::new();
    }

    (0..count)
        .into_par_iter()
        .map(|idx| CourseSeed {
            name: CatchPhrase().fake(),
            description: Paragraph(2..4).fake(),
            pricing: format!("{} DZD", (10..200).fake::<u32>() * 100),
            duration_minutes: (30..600).fake(),
            language: pick(LANGUAGES).to_string(),
            level: pick(LEVELS).to_string(),
            teacher_id: teacher_ids[idx % teacher_ids.len()],
            category_id: category_ids[idx % category_ids.len()],
        })
        .collect()
}

pub async fn seed_categories(
    db: &PgPool,
    count: usize,
) -> Result<Vec<CategoryId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗂️  Seeding {} categories...", count);

    let names = generate_category_names(count);
    let ids: Vec<CategoryId> = sqlx::query_scalar(
        "INSERT INTO categories (name)
         SELECT * FROM UNNEST($1::text[])
         RETURNING id",
    )
    .bind(&names)
    .fetch_all(db)
    .await?;

    println!(
        "   ✓ Inserted {} categories in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn seed_courses(
    db: &PgPool,
    count: usize,
    teacher_ids: &[TeacherId],
    category_ids: &[CategoryId],
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let courses = generate_courses(count, teacher_ids, category_ids);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(courses.len());

    for course in &courses {
        let id: CourseId = sqlx::query_scalar(
            "INSERT INTO courses
                (name, description, pricing, duration_minutes, language, level, teacher_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&course.name)
        .bind(&course.description)
        .bind(&course.pricing)
        .bind(course.duration_minutes)
        .bind(&course.language)
        .bind(&course.level)
        .bind(course.teacher_id)
        .bind(course.category_id)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_names_are_unique() {
        let names = generate_category_names(50);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_courses_round_robin() {
        let teachers = vec![TeacherId::new(), TeacherId::new()];
        let categories = vec![CategoryId::new(), CategoryId::new(), CategoryId::new()];

        let courses = generate_courses(6, &teachers, &categories);
        assert_eq!(courses.len(), 6);
        assert_eq!(courses[0].teacher_id, teachers[0]);
        assert_eq!(courses[3].teacher_id, teachers[1]);
        assert_eq!(courses[4].category_id, categories[1]);
        assert!(courses.iter().all(|c| LEVELS.contains(&c.level.as_str())));
    }

    #[test]
    fn test_no_courses_without_owners() {
        assert!(generate_courses(5, &[], &[CategoryId::new()]).is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("synergy"), "Synergy");
        assert_eq!(capitalize(""), "");
    }
}
