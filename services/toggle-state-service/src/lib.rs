use axum::{
    http::StatusCode,
    routing::{any, get},
    Router,
};
use toggle_http::{config::HEALTH_ROUTE, cors::with_cross_origin_headers, errors::panic_response};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod handler;

/// Build the service router with the state handler mounted at `state_route`.
pub fn router(state_route: &str) -> Router {
    let app = Router::new()
        .route(HEALTH_ROUTE, get(healthz))
        .route(state_route, any(handler::handle_state))
        .fallback(not_found);

    with_service_layers(app)
}

/// Panic recovery innermost, cross-origin headers outermost, so even a
/// panicking handler answers with the fixed 500 and the usual headers.
pub fn with_service_layers(app: Router) -> Router {
    let app = app
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());

    with_cross_origin_headers(app)
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
