pub use dzskills_models::feedbacks::*;
