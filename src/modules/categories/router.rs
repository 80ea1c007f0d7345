use axum::{Router, routing::get};

use crate::modules::subcategories::controller::get_category_subcategories;
use crate::state::AppState;

use super::controller::{
    create_category, delete_category, get_categories, get_category_by_id, update_category,
};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category_by_id)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/{id}/subcategories", get(get_category_subcategories))
}
