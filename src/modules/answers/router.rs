use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_answer, delete_answer, get_answer_by_id, get_answers, update_answer,
};

pub fn init_answers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_answers).post(create_answer))
        .route(
            "/{id}",
            get(get_answer_by_id)
                .put(update_answer)
                .delete(delete_answer),
        )
}
