use axum::{Router, routing::get};

use crate::modules::enrollments::controller::get_student_enrollments;
use crate::modules::feedbacks::controller::get_student_feedbacks;
use crate::modules::ratings::controller::get_student_ratings;
use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_student_by_id, get_students, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route(
            "/{id}",
            get(get_student_by_id)
                .put(update_student)
                .delete(delete_student),
        )
        .route("/{id}/feedbacks", get(get_student_feedbacks))
        .route("/{id}/ratings", get(get_student_ratings))
        .route("/{id}/enrollments", get(get_student_enrollments))
}
