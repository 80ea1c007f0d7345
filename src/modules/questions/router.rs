use axum::{Router, routing::get};

use crate::modules::answers::controller::get_question_answers;
use crate::state::AppState;

use super::controller::{
    create_question, delete_question, get_question_by_id, get_questions, update_question,
};

pub fn init_questions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_questions).post(create_question))
        .route(
            "/{id}",
            get(get_question_by_id)
                .put(update_question)
                .delete(delete_question),
        )
        .route("/{id}/answers", get(get_question_answers))
}
