// ABOUTME: Unified error handling for authentication and protected endpoints
// ABOUTME: Defines the auth error taxonomy, HTTP status mapping, and JSON error bodies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Error Handling
//!
//! Typed failures for token issuance and validation, plus the HTTP response
//! formatting shared by every protected route. Session lookups against a
//! closed session are deliberately *not* part of this taxonomy: they are a
//! benign race and surface as `false`/`None` returns from the registry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication and authorization failures surfaced to callers.
///
/// Credential failures intentionally carry no detail about which field was
/// wrong; scope failures name the offending scope so a client can correct
/// its request.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown client identity or mismatched secret
    #[error("client authentication failed")]
    InvalidClient,

    /// A requested scope is not permitted for this client
    #[error("client is not permitted to request scope: {scope}")]
    ScopeDenied {
        /// First scope that failed the check
        scope: String,
    },

    /// Token fails structural or signature verification
    #[error("bearer token is malformed: {details}")]
    Malformed {
        /// What failed to parse or verify
        details: String,
    },

    /// Token is past its validity window
    #[error("bearer token expired at {expired_at}")]
    Expired {
        /// When the token expired
        expired_at: chrono::DateTime<chrono::Utc>,
    },

    /// Token verified but its subject no longer resolves to a known client
    #[error("token subject is no longer a registered client")]
    UnknownSubject,
}

impl AuthError {
    /// HTTP status for this failure
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidClient | Self::Malformed { .. } | Self::Expired { .. } => {
                StatusCode::UNAUTHORIZED
            }
            Self::ScopeDenied { .. } | Self::UnknownSubject => StatusCode::FORBIDDEN,
        }
    }

    /// Stable machine-readable code used in error bodies
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidClient => "invalid_client",
            Self::ScopeDenied { .. } => "scope_denied",
            Self::Malformed { .. } => "token_malformed",
            Self::Expired { .. } => "token_expired",
            Self::UnknownSubject => "unknown_subject",
        }
    }
}

/// JSON error body returned by protected routes
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub error_description: String,
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self {
            error: error.code().to_owned(),
            error_description: error.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = ErrorResponse::from(&self);
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(value) = axum::http::HeaderValue::from_str("Bearer") {
                response
                    .headers_mut()
                    .insert(axum::http::header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
