use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{export, handlers, middleware::metrics_middleware, orders, redesign, selection};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Listing
        .route("/orders", get(orders::get_orders))
        .route("/orders/reload", post(orders::reload_orders))
        .route("/orders/query", put(orders::set_query))
        .route("/orders/rows-per-page", put(orders::set_rows_per_page))
        .route("/orders/page", put(orders::set_page))
        .route("/orders/sort/{key}", post(orders::click_sort))
        .route("/orders/reset", post(orders::reset))
        // Selection
        .route(
            "/selection",
            get(selection::get_selection).delete(selection::clear),
        )
        .route("/selection/{id}/toggle", post(selection::toggle))
        .route("/selection/toggle-visible", post(selection::toggle_visible))
        // Bulk actions
        .route("/redesign/message", put(redesign::set_message))
        .route("/redesign", post(redesign::submit))
        .route("/export", post(export::export));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
