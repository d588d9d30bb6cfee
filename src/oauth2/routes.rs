// ABOUTME: OAuth 2.0 HTTP routes: token exchange and well-known discovery documents
// ABOUTME: Discovery metadata is static configuration derived from the bound port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::constants::scopes;
use crate::oauth2::endpoints::OAuth2AuthorizationServer;
use crate::oauth2::models::{OAuth2Error, TokenRequest, TokenResponse};
use crate::resources::ServerResources;
use axum::extract::{Form, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// OAuth 2.0 routes: token endpoint plus discovery metadata
pub fn oauth2_routes() -> Router<Arc<ServerResources>> {
    Router::new()
        .route("/token", post(handle_token))
        .route(
            "/.well-known/oauth-authorization-server",
            get(authorization_server_metadata),
        )
        .route(
            "/.well-known/oauth-protected-resource",
            get(protected_resource_metadata),
        )
}

/// Handle token request (`POST /token`)
async fn handle_token(
    State(resources): State<Arc<ServerResources>>,
    Form(request): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, OAuth2Error> {
    let server = OAuth2AuthorizationServer::new(
        Arc::clone(&resources.auth_manager),
        Arc::clone(&resources.client_directory),
    );
    server.token(&request).map(Json)
}

/// OAuth 2.0 Authorization Server Metadata (RFC 8414)
async fn authorization_server_metadata(
    State(resources): State<Arc<ServerResources>>,
) -> Json<serde_json::Value> {
    let base_url = format!("http://localhost:{}", resources.config.http_port);
    Json(serde_json::json!({
        "issuer": base_url,
        "token_endpoint": format!("{base_url}/token"),
        "token_endpoint_auth_methods_supported": ["client_secret_post"],
        "grant_types_supported": ["client_credentials"],
        "scopes_supported": scopes::SUPPORTED,
    }))
}

/// OAuth 2.0 Protected Resource Metadata
async fn protected_resource_metadata(
    State(resources): State<Arc<ServerResources>>,
) -> Json<serde_json::Value> {
    let base_url = format!("http://localhost:{}", resources.config.http_port);
    Json(serde_json::json!({
        "resource_server": base_url,
        "authorization_server": base_url,
        "scopes_supported": scopes::SUPPORTED,
    }))
}
