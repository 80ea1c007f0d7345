pub mod answers;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod course_quizzes;
pub mod courses;
pub mod enrollments;
pub mod exam_quizzes;
pub mod exams;
pub mod feedbacks;
pub mod questions;
pub mod ratings;
pub mod students;
pub mod subcategories;
pub mod teachers;
pub mod videos;

pub use self::auth::model::LoginRequest;
