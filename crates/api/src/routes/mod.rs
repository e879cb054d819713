//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database)
//!
//! # POS
//! GET    /api/pos             - List all POS entries
//! POST   /api/pos             - Create a POS
//! GET    /api/pos/filter      - Find a POS by exact name (?name=)
//! GET    /api/pos/{id}        - Get a POS
//! PUT    /api/pos/{id}        - Replace a POS
//! DELETE /api/pos/{id}        - Delete a POS
//! ```

pub mod health;
pub mod pos;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Create the POS API routes router.
pub fn pos_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pos::list).post(pos::create))
        .route("/filter", get(pos::filter))
        .route(
            "/{id}",
            get(pos::get).put(pos::update).delete(pos::delete),
        )
}

/// Build the complete application router with tracing and Sentry layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/pos", pos_routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
