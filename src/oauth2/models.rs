// ABOUTME: OAuth 2.0 data models for the token endpoint and its error bodies
// ABOUTME: Implements RFC 6749 request/response structures for the client-credentials grant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// OAuth 2.0 Token Request (form-encoded body of `POST /token`)
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Grant type; only `client_credentials` is supported
    pub grant_type: String,
    /// Client identity
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Space-separated scope names, order-significant
    #[serde(default)]
    pub scope: String,
}

impl TokenRequest {
    /// Requested scopes in request order
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

/// OAuth 2.0 Token Response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Seconds until expiry
    pub expires_in: i64,
    /// Space-separated granted scopes, in request order
    pub scope: String,
}

/// OAuth 2.0 Error Response (RFC 6749 §5.2)
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuth2Error {
    /// Error code
    pub error: String,
    /// Human-readable error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// URI for error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
}

impl OAuth2Error {
    /// Malformed or incomplete request
    #[must_use]
    pub fn invalid_request(description: &str) -> Self {
        Self {
            error: "invalid_request".to_owned(),
            error_description: Some(description.to_owned()),
            error_uri: Some(
                "https://datatracker.ietf.org/doc/html/rfc6749#section-5.2".to_owned(),
            ),
        }
    }

    /// Client authentication failed
    #[must_use]
    pub fn invalid_client() -> Self {
        Self {
            error: "invalid_client".to_owned(),
            error_description: Some("Client authentication failed".to_owned()),
            error_uri: Some(
                "https://datatracker.ietf.org/doc/html/rfc6749#section-5.2".to_owned(),
            ),
        }
    }

    /// Requested scope exceeds what the client may be granted
    #[must_use]
    pub fn invalid_scope(scope: &str) -> Self {
        Self {
            error: "invalid_scope".to_owned(),
            error_description: Some(format!("Client doesn't have access to scope: {scope}")),
            error_uri: Some(
                "https://datatracker.ietf.org/doc/html/rfc6749#section-3.3".to_owned(),
            ),
        }
    }

    /// Grant type not supported by this server
    #[must_use]
    pub fn unsupported_grant_type() -> Self {
        Self {
            error: "unsupported_grant_type".to_owned(),
            error_description: Some("Grant type not supported".to_owned()),
            error_uri: Some(
                "https://datatracker.ietf.org/doc/html/rfc6749#section-5.2".to_owned(),
            ),
        }
    }

    /// HTTP status for this error: 401 for failed client authentication and
    /// for scopes outside the client's allowance, 400 for everything else
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        if self.error == "invalid_client" || self.error == "invalid_scope" {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for OAuth2Error {
    fn into_response(self) -> Response {
        let status = self.http_status();
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_splitting_preserves_order() {
        let request = TokenRequest {
            grant_type: "client_credentials".into(),
            client_id: "c1".into(),
            client_secret: "s1".into(),
            scope: "sse calculator".into(),
        };
        assert_eq!(
            request.scopes(),
            vec!["sse".to_owned(), "calculator".to_owned()]
        );
    }

    #[test]
    fn test_empty_scope_yields_no_scopes() {
        let request = TokenRequest {
            grant_type: "client_credentials".into(),
            client_id: "c1".into(),
            client_secret: "s1".into(),
            scope: String::new(),
        };
        assert!(request.scopes().is_empty());
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            OAuth2Error::invalid_client().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            OAuth2Error::invalid_scope("sse").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            OAuth2Error::unsupported_grant_type().http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OAuth2Error::invalid_request("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
