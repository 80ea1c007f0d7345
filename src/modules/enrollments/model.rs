pub use dzskills_models::enrollments::*;
