use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_exam_quiz, delete_exam_quiz, get_all_exam_quizzes, get_exam_quiz_by_id,
    update_exam_quiz,
};

pub fn init_exam_quizzes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_exam_quizzes).post(create_exam_quiz))
        .route(
            "/{id}",
            get(get_exam_quiz_by_id)
                .put(update_exam_quiz)
                .delete(delete_exam_quiz),
        )
}
