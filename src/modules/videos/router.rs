use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_video, delete_video, get_video_by_id, get_videos, update_video,
};

pub fn init_videos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_videos).post(create_video))
        .route(
            "/{id}",
            get(get_video_by_id)
                .put(update_video)
                .delete(delete_video),
        )
}
