use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_course_quiz, delete_course_quiz, get_all_course_quizzes, get_course_quiz_by_id,
    update_course_quiz,
};

pub fn init_course_quizzes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_course_quizzes).post(create_course_quiz))
        .route(
            "/{id}",
            get(get_course_quiz_by_id)
                .put(update_course_quiz)
                .delete(delete_course_quiz),
        )
}
