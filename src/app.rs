//! Full application router: user routes, probes, docs, and the shared middleware stack.

use crate::routes::{common_routes, docs_routes, user_routes};
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(user_routes(state.clone()))
        .merge(common_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
