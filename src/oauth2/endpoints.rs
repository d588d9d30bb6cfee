// ABOUTME: OAuth 2.0 token endpoint implementation for the client-credentials grant
// ABOUTME: Dispatches on grant type and maps auth failures onto RFC 6749 error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::auth::AuthManager;
use crate::clients::ClientDirectory;
use crate::constants::oauth;
use crate::errors::AuthError;
use crate::oauth2::models::{OAuth2Error, TokenRequest, TokenResponse};
use std::sync::Arc;

/// OAuth 2.0 Authorization Server
///
/// Only the client-credentials grant is implemented; there is no user,
/// no consent screen, and no refresh flow.
pub struct OAuth2AuthorizationServer {
    auth_manager: Arc<AuthManager>,
    directory: Arc<ClientDirectory>,
}

impl OAuth2AuthorizationServer {
    /// Create a server over shared auth components
    #[must_use]
    pub fn new(auth_manager: Arc<AuthManager>, directory: Arc<ClientDirectory>) -> Self {
        Self {
            auth_manager,
            directory,
        }
    }

    /// Handle a token request (`POST /token`).
    ///
    /// # Errors
    ///
    /// Returns an RFC 6749 error body when the grant type is unsupported,
    /// the credentials are wrong, or a requested scope is not permitted.
    pub fn token(&self, request: &TokenRequest) -> Result<TokenResponse, OAuth2Error> {
        if request.grant_type != oauth::GRANT_CLIENT_CREDENTIALS {
            return Err(OAuth2Error::unsupported_grant_type());
        }

        let requested_scopes = request.scopes();
        let issued = self
            .auth_manager
            .issue(
                &self.directory,
                &request.client_id,
                &request.client_secret,
                &requested_scopes,
            )
            .map_err(|e| match e {
                AuthError::InvalidClient => OAuth2Error::invalid_client(),
                AuthError::ScopeDenied { scope } => OAuth2Error::invalid_scope(&scope),
                other => OAuth2Error::invalid_request(&other.to_string()),
            })?;

        Ok(TokenResponse {
            access_token: issued.access_token,
            token_type: oauth::TOKEN_TYPE_BEARER.to_owned(),
            expires_in: issued.expires_in,
            scope: issued.granted_scopes.join(" "),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::clients::ClientRecord;

    fn server() -> OAuth2AuthorizationServer {
        let directory = Arc::new(ClientDirectory::from_records(vec![ClientRecord {
            client_id: "c1".into(),
            client_secret: "s1".into(),
            scopes: vec!["calculator".into()],
        }]));
        let auth_manager = Arc::new(AuthManager::new(b"endpoint-test-secret", 30));
        OAuth2AuthorizationServer::new(auth_manager, directory)
    }

    fn request(grant_type: &str, secret: &str, scope: &str) -> TokenRequest {
        TokenRequest {
            grant_type: grant_type.into(),
            client_id: "c1".into(),
            client_secret: secret.into(),
            scope: scope.into(),
        }
    }

    #[test]
    fn test_client_credentials_grant_succeeds() {
        let response = server()
            .token(&request("client_credentials", "s1", "calculator"))
            .unwrap();
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.scope, "calculator");
        assert_eq!(response.expires_in, 30 * 60);
        assert!(!response.access_token.is_empty());
    }

    #[test]
    fn test_unsupported_grant_type() {
        let err = server()
            .token(&request("authorization_code", "s1", ""))
            .unwrap_err();
        assert_eq!(err.error, "unsupported_grant_type");
    }

    #[test]
    fn test_bad_credentials_map_to_invalid_client() {
        let err = server()
            .token(&request("client_credentials", "wrong", ""))
            .unwrap_err();
        assert_eq!(err.error, "invalid_client");
    }

    #[test]
    fn test_excess_scope_maps_to_invalid_scope() {
        let err = server()
            .token(&request("client_credentials", "s1", "sse"))
            .unwrap_err();
        assert_eq!(err.error, "invalid_scope");
        assert!(err.error_description.unwrap().contains("sse"));
    }
}
