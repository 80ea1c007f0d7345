pub use dzskills_models::ratings::*;
