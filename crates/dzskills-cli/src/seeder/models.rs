//! Seed rows and seeding configuration.

use dzskills_models::ids::{CategoryId, TeacherId};

/// A teacher or student account ready for insertion.
pub struct AccountSeed {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub struct CourseSeed {
    pub name: String,
    pub description: String,
    pub pricing: String,
    pub duration_minutes: i32,
    pub language: String,
    pub level: String,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
}

/// How many rows of each kind `seed_all` creates.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub teachers: usize,
    pub students: usize,
    pub categories: usize,
    pub courses: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 5,
            students: 20,
            categories: 4,
            courses: 10,
        }
    }
}

impl SeedConfig {
    pub fn with_courses(mut self, courses: usize) -> Self {
        self.courses = courses;
        self
    }

    /// Courses need at least one teacher and one category to hang off.
    pub fn can_seed_courses(&self) -> bool {
        self.teachers > 0 && self.categories > 0
    }

    pub fn total_accounts(&self) -> usize {
        self.teachers + self.students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SeedConfig::default();
        assert_eq!(config.total_accounts(), 25);
        assert!(config.can_seed_courses());
    }

    #[test]
    fn test_courses_need_teachers_and_categories() {
        let config = SeedConfig {
            teachers: 0,
            ..SeedConfig::default()
        };
        assert!(!config.can_seed_courses());

        let config = SeedConfig {
            categories: 0,
            ..SeedConfig::default()
        };
        assert!(!config.can_seed_courses());
    }

    #[test]
    fn test_with_courses() {
        assert_eq!(SeedConfig::default().with_courses(42).courses, 42);
    }
}
