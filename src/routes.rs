// ABOUTME: HTTP route assembly: calculator tools, health, and the combined router
// ABOUTME: Calculator endpoints are bearer-gated; health and discovery are open
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::scopes;
use crate::errors::AuthError;
use crate::oauth2::routes::oauth2_routes;
use crate::resources::ServerResources;
use crate::sse::routes::sse_routes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete application router over shared resources
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/calculator/add", post(handle_add))
        .route("/calculator/subtract", post(handle_subtract))
        .route("/calculator/multiply", post(handle_multiply))
        .route("/calculator/divide", post(handle_divide))
        .merge(oauth2_routes())
        .merge(sse_routes())
        .layer(TraceLayer::new_for_http())
        // Permissive CORS: this server fronts browser-based demo clients
        .layer(CorsLayer::permissive())
        .with_state(resources)
}

/// Root banner
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "MCP Server is running" }))
}

/// Health check with the live push-channel session count
async fn health(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "connected_clients": resources.session_registry.live_sessions(),
    }))
}

/// Operands for the binary calculator operations
#[derive(Debug, Deserialize)]
struct OperandParams {
    a: f64,
    b: f64,
}

async fn handle_add(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(params): Query<OperandParams>,
) -> Result<Json<serde_json::Value>, AuthError> {
    resources
        .auth_middleware
        .require_scope(&headers, scopes::CALCULATOR)?;
    let result = resources.calculator.add(params.a, params.b);
    Ok(Json(json!({ "operation": "add", "result": result })))
}

async fn handle_subtract(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(params): Query<OperandParams>,
) -> Result<Json<serde_json::Value>, AuthError> {
    resources
        .auth_middleware
        .require_scope(&headers, scopes::CALCULATOR)?;
    let result = resources.calculator.subtract(params.a, params.b);
    Ok(Json(json!({ "operation": "subtract", "result": result })))
}

async fn handle_multiply(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(params): Query<OperandParams>,
) -> Result<Json<serde_json::Value>, AuthError> {
    resources
        .auth_middleware
        .require_scope(&headers, scopes::CALCULATOR)?;
    let result = resources.calculator.multiply(params.a, params.b);
    Ok(Json(json!({ "operation": "multiply", "result": result })))
}

async fn handle_divide(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(params): Query<OperandParams>,
) -> Result<Json<serde_json::Value>, Response> {
    resources
        .auth_middleware
        .require_scope(&headers, scopes::CALCULATOR)
        .map_err(IntoResponse::into_response)?;

    match resources.calculator.divide(params.a, params.b) {
        Ok(result) => Ok(Json(json!({ "operation": "divide", "result": result }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_operand",
                "error_description": e.to_string(),
            })),
        )
            .into_response()),
    }
}
