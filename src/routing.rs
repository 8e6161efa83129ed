//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints, locations::get_locations, not_found::get_404_not_found,
    public_config::get_public_config, sign_out::post_sign_out,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::LOCATIONS, get(get_locations))
        .route(endpoints::SIGN_OUT, post(post_sign_out))
        .route(endpoints::PUBLIC_CONFIG, get(get_public_config))
        .fallback(get_404_not_found)
        .with_state(state)
}
