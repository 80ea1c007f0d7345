use axum::{
    Router,
    routing::{get, post},
};
use tower_governor::GovernorLayer;

use dzskills_config::RateLimitConfig;

use crate::state::AppState;

use super::controller::{login, me};

/// Login gets its own per-IP bucket when rate limiting is on.
pub fn init_auth_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let login_route = if rate_limit.enabled {
        post(login).layer(GovernorLayer::new(rate_limit.auth_governor_config()))
    } else {
        post(login)
    };

    Router::new()
        .route("/login", login_route)
        .route("/me", get(me))
}
