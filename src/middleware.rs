// ABOUTME: Bearer-token authentication middleware for protected HTTP routes
// ABOUTME: Extracts and validates Authorization headers and enforces granted scopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::auth::{AuthManager, AuthenticatedClient};
use crate::clients::ClientDirectory;
use crate::errors::{AuthError, AuthResult};
use axum::http::HeaderMap;
use std::sync::Arc;

/// Middleware for bearer-token authentication on protected routes
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    directory: Arc<ClientDirectory>,
}

impl AuthMiddleware {
    /// Create new auth middleware over shared auth components
    #[must_use]
    pub fn new(auth_manager: Arc<AuthManager>, directory: Arc<ClientDirectory>) -> Self {
        Self {
            auth_manager,
            directory,
        }
    }

    /// Authenticate a request from its `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or not a bearer credential,
    /// or if token validation fails (see [`AuthManager::validate`]).
    pub fn authenticate_request(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedClient> {
        let header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AuthError::Malformed {
                details: "missing Authorization header".to_owned(),
            })?;

        // Header content is never logged to prevent token leakage.
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::Malformed {
                details: "Authorization header must be 'Bearer <token>'".to_owned(),
            })?;

        match self.auth_manager.validate(&self.directory, token) {
            Ok(client) => {
                tracing::debug!(
                    "Bearer authentication successful for client {}",
                    client.client.client_id
                );
                Ok(client)
            }
            Err(e) => {
                tracing::warn!("Bearer authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Authenticate and require a specific granted scope.
    ///
    /// Scope gating inspects the scopes granted to the *token*, not the
    /// client's full allowance: a client permitted `sse` that requested only
    /// `calculator` at issuance is still denied here.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ScopeDenied`] when the token lacks the scope, in
    /// addition to the failures of [`Self::authenticate_request`].
    pub fn require_scope(&self, headers: &HeaderMap, scope: &str) -> AuthResult<AuthenticatedClient> {
        let client = self.authenticate_request(headers)?;
        if !client.has_scope(scope) {
            tracing::warn!(
                "Client {} token lacks required scope {}",
                client.client.client_id,
                scope
            );
            return Err(AuthError::ScopeDenied {
                scope: scope.to_owned(),
            });
        }
        Ok(client)
    }
}
