pub use dzskills_models::videos::*;
