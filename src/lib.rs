pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::pages::index_page))
        .route("/health", get(handlers::health::health))
        .route("/admin", get(handlers::admin::admin_page))
        .route(
            "/api/bookings",
            post(handlers::booking::submit_booking)
                .fallback(handlers::booking::method_not_allowed),
        )
        .route("/api/bookings/list", get(handlers::admin::list_bookings))
        .route("/api/bookings/events", get(handlers::admin::events_stream))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
