pub use dzskills_models::teachers::*;
