use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::modules::articles::controller::get_course_articles;
use crate::modules::course_quizzes::controller::get_course_quizzes;
use crate::modules::exams::controller::get_course_exam;
use crate::modules::ratings::controller::{get_course_average_rating, get_course_ratings};
use crate::modules::videos::controller::get_course_videos;
use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_course_by_id, get_courses, update_course,
    upload_course_image,
};
use super::model::CourseImageValidator;

/// Multipart overhead on top of the image itself.
const UPLOAD_BODY_LIMIT: usize = CourseImageValidator::MAX_SIZE_BYTES + 64 * 1024;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course_by_id)
                .put(update_course)
                .delete(delete_course),
        )
        .route(
            "/{id}/image",
            post(upload_course_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}/articles", get(get_course_articles))
        .route("/{id}/videos", get(get_course_videos))
        .route("/{id}/quizzes", get(get_course_quizzes))
        .route("/{id}/exam", get(get_course_exam))
        .route("/{id}/ratings", get(get_course_ratings))
        .route("/{id}/ratings/average", get(get_course_average_rating))
}
