use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_article, delete_article, get_article_by_id, get_articles, update_article,
};

pub fn init_articles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_articles).post(create_article))
        .route(
            "/{id}",
            get(get_article_by_id)
                .put(update_article)
                .delete(delete_article),
        )
}
