use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_rating, delete_rating, get_rating, get_ratings, update_rating};

pub fn init_ratings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_ratings).post(create_rating))
        .route(
            "/{course_id}/{student_id}",
            get(get_rating).put(update_rating).delete(delete_rating),
        )
}
