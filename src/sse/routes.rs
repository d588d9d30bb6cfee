// ABOUTME: SSE route handlers: push-channel connections and the broadcast trigger
// ABOUTME: Runs the per-session polling delivery loop with RAII session teardown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::registry::SessionGuard;
use crate::constants::scopes;
use crate::errors::AuthError;
use crate::resources::ServerResources;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

/// SSE and broadcast routes
pub fn sse_routes() -> Router<Arc<ServerResources>> {
    Router::new()
        .route("/events", get(handle_events))
        // Aliases kept for clients that connect via the legacy paths
        .route("/events/sse", get(handle_events))
        .route("/calculator/sse", get(handle_events))
        .route("/broadcast", post(handle_broadcast))
}

/// Open a push-channel session and stream its queue until disconnect.
///
/// Authentication happens once, at connection time; individual messages are
/// not re-checked. The delivery loop polls the session queue with a bounded
/// idle delay rather than blocking on a wakeup signal — fine at the message
/// rates this server sees, and the FIFO-per-session contract would survive a
/// notify-based replacement.
///
/// # Errors
///
/// Returns an auth error when the bearer token is missing, invalid, or was
/// not granted the `sse` scope.
async fn handle_events(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthError> {
    let client = resources
        .auth_middleware
        .require_scope(&headers, scopes::SSE)?;

    let session_id = resources.session_registry.open();
    tracing::info!(
        "Client {} connected to push channel as session {}",
        client.client.client_id,
        session_id
    );

    let registry = Arc::clone(&resources.session_registry);
    let poll_interval = Duration::from_millis(resources.config.sse.poll_interval_ms);

    // The guard is created here and moved into the generator at construction,
    // so the session closes even when the stream is dropped before its first
    // poll, or mid-await on disconnect.
    let guard = SessionGuard::new(Arc::clone(&resources.session_registry), session_id);

    let stream = async_stream::stream! {
        let mut event_id: u64 = 1;
        yield Ok::<_, Infallible>(Event::default()
            .id(event_id.to_string())
            .event("connection")
            .data("connected"));

        loop {
            match registry.try_dequeue(guard.session_id()) {
                Some(message) => {
                    event_id += 1;
                    yield Ok(Event::default()
                        .id(event_id.to_string())
                        .event("message")
                        .data(message));
                }
                None => tokio::time::sleep(poll_interval).await,
            }
        }
    };

    let keepalive = KeepAlive::new()
        .interval(Duration::from_secs(resources.config.sse.keepalive_secs))
        .text("keepalive");

    Ok(Sse::new(stream).keep_alive(keepalive))
}

/// Query parameters for the broadcast trigger
#[derive(Debug, Deserialize)]
struct BroadcastParams {
    message: String,
}

/// Broadcast a message to every live push-channel session.
///
/// # Errors
///
/// Returns an auth error when the caller's bearer token is missing or
/// invalid.
async fn handle_broadcast(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(params): Query<BroadcastParams>,
) -> Result<impl IntoResponse, AuthError> {
    resources.auth_middleware.authenticate_request(&headers)?;

    let recipients = resources.broadcaster.broadcast(&params.message);
    Ok(Json(serde_json::json!({
        "status": "Message broadcast",
        "recipients": recipients,
    })))
}
