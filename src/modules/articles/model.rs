pub use dzskills_models::articles::*;
