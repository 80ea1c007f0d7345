use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_enrollment, delete_enrollment, get_enrollment, get_enrollments, submit_exam,
    update_enrollment,
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_enrollments).post(create_enrollment))
        .route(
            "/{student_id}/{course_id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
        .route("/{student_id}/{course_id}/exam", post(submit_exam))
}
