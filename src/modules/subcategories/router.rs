use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_subcategory, delete_subcategory, get_subcategories, get_subcategory_by_id,
    update_subcategory,
};

pub fn init_subcategories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_subcategories).post(create_subcategory))
        .route(
            "/{id}",
            get(get_subcategory_by_id)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
}
