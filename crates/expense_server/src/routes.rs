//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, put};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/{id}", put(handlers::update_category))
        .route(
            "/categories/{id}/codes",
            get(handlers::list_codes).post(handlers::create_code),
        )
        .route("/codes/{id}", put(handlers::update_code))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
}
