use axum::{Router, routing::get};

use crate::modules::exam_quizzes::controller::get_exam_quizzes;
use crate::state::AppState;

use super::controller::{create_exam, delete_exam, get_exam_by_id, get_exams, update_exam};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_exams).post(create_exam))
        .route(
            "/{id}",
            get(get_exam_by_id).put(update_exam).delete(delete_exam),
        )
        .route("/{id}/quizzes", get(get_exam_quizzes))
}
