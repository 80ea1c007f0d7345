pub use dzskills_models::exams::*;
