// ABOUTME: Integration tests for the token issuance and validation flow
// ABOUTME: Covers scope grants, middleware gating, and the error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use mcp_calc_server::auth::AuthManager;
use mcp_calc_server::clients::{ClientDirectory, ClientRecord};
use mcp_calc_server::errors::AuthError;
use mcp_calc_server::middleware::AuthMiddleware;
use std::sync::Arc;

fn directory() -> ClientDirectory {
    ClientDirectory::from_records(common::test_config().clients)
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

#[test]
fn test_full_client_credentials_flow() {
    let manager = AuthManager::new(b"flow-secret", 30);
    let dir = directory();

    let issued = manager
        .issue(&dir, "c1", "s1", &["calculator".into(), "sse".into()])
        .unwrap();
    assert_eq!(issued.expires_in, 30 * 60);

    let authenticated = manager.validate(&dir, &issued.access_token).unwrap();
    assert_eq!(authenticated.client.client_id, "c1");
    assert!(authenticated.has_scope("calculator"));
    assert!(authenticated.has_scope("sse"));
}

#[test]
fn test_granted_scopes_preserve_request_order() {
    let manager = AuthManager::new(b"flow-secret", 30);
    let dir = directory();

    let issued = manager
        .issue(&dir, "c1", "s1", &["sse".into(), "calculator".into()])
        .unwrap();
    assert_eq!(
        issued.granted_scopes,
        vec!["sse".to_owned(), "calculator".to_owned()]
    );
}

#[test]
fn test_token_without_scopes_passes_no_gates() {
    let manager = AuthManager::new(b"flow-secret", 30);
    let dir = directory();

    let issued = manager.issue(&dir, "c1", "s1", &[]).unwrap();
    let authenticated = manager.validate(&dir, &issued.access_token).unwrap();
    assert!(!authenticated.has_scope("calculator"));
    assert!(!authenticated.has_scope("sse"));
}

#[test]
fn test_scope_outside_allowance_aborts_issuance() {
    let manager = AuthManager::new(b"flow-secret", 30);
    let dir = directory();

    let err = manager
        .issue(&dir, "calc-only", "s2", &["calculator".into(), "sse".into()])
        .unwrap_err();
    match err {
        AuthError::ScopeDenied { scope } => assert_eq!(scope, "sse"),
        other => panic!("expected ScopeDenied, got {other:?}"),
    }
}

#[test]
fn test_middleware_rejects_missing_and_malformed_headers() {
    let manager = Arc::new(AuthManager::new(b"flow-secret", 30));
    let middleware = AuthMiddleware::new(Arc::clone(&manager), Arc::new(directory()));

    let err = middleware.authenticate_request(&HeaderMap::new()).unwrap_err();
    assert!(matches!(err, AuthError::Malformed { .. }));

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_static("Basic dXNlcjpwYXNz"),
    );
    let err = middleware.authenticate_request(&headers).unwrap_err();
    assert!(matches!(err, AuthError::Malformed { .. }));
}

#[test]
fn test_middleware_gates_on_granted_scopes() {
    let manager = Arc::new(AuthManager::new(b"flow-secret", 30));
    let dir = Arc::new(directory());
    let middleware = AuthMiddleware::new(Arc::clone(&manager), Arc::clone(&dir));

    // c1 is allowed both scopes but this token only asked for calculator.
    let issued = manager
        .issue(&dir, "c1", "s1", &["calculator".into()])
        .unwrap();
    let headers = bearer_headers(&issued.access_token);

    assert!(middleware.require_scope(&headers, "calculator").is_ok());
    let err = middleware.require_scope(&headers, "sse").unwrap_err();
    assert!(matches!(err, AuthError::ScopeDenied { .. }));
}

#[test]
fn test_expired_token_through_middleware() {
    let manager = Arc::new(AuthManager::new(b"flow-secret", 0));
    let dir = Arc::new(directory());
    let middleware = AuthMiddleware::new(Arc::clone(&manager), Arc::clone(&dir));

    let issued = manager.issue(&dir, "c1", "s1", &[]).unwrap();
    let err = middleware
        .authenticate_request(&bearer_headers(&issued.access_token))
        .unwrap_err();
    assert!(matches!(err, AuthError::Expired { .. }));
}

#[test]
fn test_error_status_and_code_mapping() {
    let cases = [
        (AuthError::InvalidClient, StatusCode::UNAUTHORIZED, "invalid_client"),
        (
            AuthError::ScopeDenied { scope: "sse".into() },
            StatusCode::FORBIDDEN,
            "scope_denied",
        ),
        (
            AuthError::Malformed {
                details: "bad".into(),
            },
            StatusCode::UNAUTHORIZED,
            "token_malformed",
        ),
        (AuthError::UnknownSubject, StatusCode::FORBIDDEN, "unknown_subject"),
    ];
    for (err, status, code) in cases {
        assert_eq!(err.http_status(), status, "status for {code}");
        assert_eq!(err.code(), code);
    }
}

#[test]
fn test_duplicate_client_ids_later_record_wins() {
    let dir = ClientDirectory::from_records(vec![
        ClientRecord {
            client_id: "dup".into(),
            client_secret: "first".into(),
            scopes: vec![],
        },
        ClientRecord {
            client_id: "dup".into(),
            client_secret: "second".into(),
            scopes: vec!["calculator".into()],
        },
    ]);

    let manager = AuthManager::new(b"flow-secret", 30);
    assert!(manager.issue(&dir, "dup", "first", &[]).is_err());
    assert!(manager.issue(&dir, "dup", "second", &[]).is_ok());
}
