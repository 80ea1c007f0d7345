pub use dzskills_models::students::*;
