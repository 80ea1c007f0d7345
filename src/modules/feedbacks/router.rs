use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_feedback, delete_feedback, get_feedback_by_id, get_feedbacks, update_feedback,
};

pub fn init_feedbacks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_feedbacks).post(create_feedback))
        .route(
            "/{id}",
            get(get_feedback_by_id)
                .put(update_feedback)
                .delete(delete_feedback),
        )
}
