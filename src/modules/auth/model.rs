pub use dzskills_models::auth::*;
