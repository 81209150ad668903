//! API routes module
//!
//! This module defines all HTTP routes of the eShop API. They are served
//! from the root; `axum_helpers::create_router` adds docs, middleware and the
//! 404 fallback around them.

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(products::router(state))
        .merge(health::router(state.clone()))
}

/// Plain-text banner confirming the server is up
#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses(
        (
            status = 200,
            description = "Server is running",
            body = String,
            content_type = "text/plain"
        )
    )
)]
pub async fn root() -> &'static str {
    "eShop server running"
}
