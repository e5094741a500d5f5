use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        queue::{create_entry, delete_entry, list_entries, route_not_found, update_entry},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// The CORS layer answers OPTIONS preflights with 200 and stamps the
/// cross-origin headers on every response, errors included.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/queue", get(list_entries).post(create_entry))
        .route("/queue/{id}", axum::routing::put(update_entry).delete(delete_entry))
        .route("/livez", get(livez))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
