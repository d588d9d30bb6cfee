// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds in-memory server resources and drives the router with oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mcp_calc_server::clients::ClientRecord;
use mcp_calc_server::config::environment::{AuthConfig, Environment, ServerConfig, SseConfig};
use mcp_calc_server::resources::ServerResources;
use mcp_calc_server::routes::build_router;
use std::sync::Arc;
use tower::ServiceExt;

/// Configuration with two seeded clients: `c1` may use both scopes,
/// `calc-only` is limited to the calculator.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8001,
        environment: Environment::Testing,
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".into(),
            token_expiry_minutes: 30,
        },
        sse: SseConfig {
            poll_interval_ms: 10,
            keepalive_secs: 15,
        },
        clients: vec![
            ClientRecord {
                client_id: "c1".into(),
                client_secret: "s1".into(),
                scopes: vec!["calculator".into(), "sse".into()],
            },
            ClientRecord {
                client_id: "calc-only".into(),
                client_secret: "s2".into(),
                scopes: vec!["calculator".into()],
            },
        ],
    }
}

pub fn test_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::new(test_config()))
}

/// Router plus the resources behind it, for tests that poke the registry
pub fn test_app() -> (Arc<ServerResources>, Router) {
    let resources = test_resources();
    let router = build_router(Arc::clone(&resources));
    (resources, router)
}

/// Send one request and eagerly read the JSON body
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    form_body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match form_body {
        Some(form) => {
            builder = builder.header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            );
            Body::from(form.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("failed to execute request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };
    (status, json)
}

/// Exchange credentials for a bearer token via the real token endpoint
pub async fn fetch_token(app: Router, client_id: &str, client_secret: &str, scope: &str) -> String {
    let form = format!(
        "grant_type=client_credentials&client_id={client_id}&client_secret={client_secret}&scope={}",
        scope.replace(' ', "+")
    );
    let (status, body) = request(app, Method::POST, "/token", None, Some(&form)).await;
    assert_eq!(status, StatusCode::OK, "token issuance failed: {body}");
    body["access_token"].as_str().unwrap().to_owned()
}
