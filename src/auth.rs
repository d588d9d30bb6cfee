// ABOUTME: JWT-based client authentication: bearer token issuance and validation
// ABOUTME: Handles the client-credentials state machine, scope checks, and expiry enforcement
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Token Issuance and Validation
//!
//! Signature-based bearer tokens avoid any server-side session table: a token
//! is valid iff its HS256 signature verifies, the current time is before
//! `exp`, and its subject still resolves in the [`ClientDirectory`]. The
//! trade-off is no revocation and no refresh flow, which is acceptable for an
//! internal-tool deployment and recorded as a known limitation.

use crate::clients::{ClientDirectory, ClientRecord};
use crate::errors::{AuthError, AuthResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// JWT claims carried by an issued bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Client identity the token was issued to
    pub sub: String,
    /// Scopes granted at issuance, in request order
    pub scopes: Vec<String>,
    /// Issued-at timestamp (unix seconds)
    pub iat: i64,
    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

/// A freshly issued token plus the metadata callers echo back to the client
#[derive(Debug)]
pub struct IssuedToken {
    /// Signed compact JWT
    pub access_token: String,
    /// Seconds until expiry
    pub expires_in: i64,
    /// Scopes granted, verbatim from the request
    pub granted_scopes: Vec<String>,
}

/// Result of validating a bearer token: the resolved client and the scopes
/// the token actually carries. Callers gating an operation must check
/// `granted_scopes`, not the client's full allowance.
#[derive(Debug)]
pub struct AuthenticatedClient {
    /// Resolved registry record for the token's subject
    pub client: ClientRecord,
    /// Scopes granted to this token at issuance
    pub granted_scopes: Vec<String>,
}

impl AuthenticatedClient {
    /// Whether the token was granted the given scope
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.granted_scopes.iter().any(|s| s == scope)
    }
}

/// Authentication manager for issuing and validating client bearer tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_minutes: i64,
}

impl AuthManager {
    /// Create a new authentication manager with a shared signing secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_minutes,
        }
    }

    /// Issue a bearer token for a client presenting its credentials.
    ///
    /// Scope checks are fail-fast: the first requested scope outside the
    /// client's allowance aborts issuance and no partial token is produced.
    /// Granted scopes preserve request order verbatim.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidClient`] if the identity is unknown or the
    ///   secret does not match (indistinguishable by design)
    /// - [`AuthError::ScopeDenied`] naming the first disallowed scope
    /// - [`AuthError::Malformed`] if JWT encoding itself fails
    pub fn issue(
        &self,
        directory: &ClientDirectory,
        client_id: &str,
        client_secret: &str,
        requested_scopes: &[String],
    ) -> AuthResult<IssuedToken> {
        let record = Self::authenticate_client(directory, client_id, client_secret)?;

        for scope in requested_scopes {
            if !record.allows_scope(scope) {
                tracing::warn!(
                    "Scope denied for client {}: requested {}",
                    client_id,
                    scope
                );
                return Err(AuthError::ScopeDenied {
                    scope: scope.clone(),
                });
            }
        }

        let now = Utc::now();
        let expiry = now + Duration::minutes(self.token_expiry_minutes);

        let claims = Claims {
            sub: record.client_id.clone(),
            scopes: requested_scopes.to_vec(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Malformed {
                details: format!("failed to encode token: {e}"),
            })?;

        tracing::info!(
            "Issued token for client {} with {} scope(s)",
            client_id,
            requested_scopes.len()
        );

        Ok(IssuedToken {
            access_token,
            expires_in: expiry.signed_duration_since(now).num_seconds(),
            granted_scopes: requested_scopes.to_vec(),
        })
    }

    /// Validate a bearer token and resolve its subject.
    ///
    /// Expiry is a wall-clock comparison with zero leeway: a token is
    /// rejected from the moment `now >= exp` and never before.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Malformed`] if the string fails to parse or verify
    /// - [`AuthError::Expired`] once the validity window has passed
    /// - [`AuthError::UnknownSubject`] if the subject no longer resolves
    pub fn validate(&self, directory: &ClientDirectory, token: &str) -> AuthResult<AuthenticatedClient> {
        let claims = self.decode_claims(token)?;
        Self::check_expiry(&claims)?;

        let client = directory
            .resolve(&claims.sub)
            .ok_or(AuthError::UnknownSubject)?
            .clone();

        Ok(AuthenticatedClient {
            client,
            granted_scopes: claims.scopes,
        })
    }

    /// Look up a client and verify its secret in constant time
    fn authenticate_client<'a>(
        directory: &'a ClientDirectory,
        client_id: &str,
        client_secret: &str,
    ) -> AuthResult<&'a ClientRecord> {
        let record = directory.resolve(client_id).ok_or(AuthError::InvalidClient)?;

        let matches: bool = record
            .client_secret
            .as_bytes()
            .ct_eq(client_secret.as_bytes())
            .into();
        if matches {
            Ok(record)
        } else {
            tracing::warn!("Credential mismatch for client {}", client_id);
            Err(AuthError::InvalidClient)
        }
    }

    /// Decode claims with signature verification but without expiry checking;
    /// expiry is enforced separately so the error can carry the exact moment
    /// the token lapsed.
    fn decode_claims(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Map JWT library errors onto the malformed-token error
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> AuthError {
        use jsonwebtoken::errors::ErrorKind;

        let details = match e.kind() {
            ErrorKind::InvalidSignature => "signature verification failed".to_owned(),
            ErrorKind::InvalidToken => "token format is invalid".to_owned(),
            ErrorKind::Base64(base64_err) => format!("invalid base64: {base64_err}"),
            ErrorKind::Json(json_err) => format!("invalid claims payload: {json_err}"),
            _ => format!("token validation failed: {e}"),
        };
        AuthError::Malformed { details }
    }

    /// Reject tokens whose validity window has passed
    fn check_expiry(claims: &Claims) -> AuthResult<()> {
        let now = Utc::now();
        if now.timestamp() >= claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(now);
            tracing::warn!(
                "Rejected expired token for client {} (expired at {})",
                claims.sub,
                expired_at.to_rfc3339()
            );
            return Err(AuthError::Expired { expired_at });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::clients::ClientRecord;

    const SECRET: &[u8] = b"unit-test-signing-secret";

    fn directory() -> ClientDirectory {
        ClientDirectory::from_records(vec![ClientRecord {
            client_id: "c1".into(),
            client_secret: "s1".into(),
            scopes: vec!["calculator".into()],
        }])
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let manager = AuthManager::new(SECRET, 30);
        let dir = directory();

        let issued = manager
            .issue(&dir, "c1", "s1", &["calculator".into()])
            .unwrap();
        assert_eq!(issued.granted_scopes, vec!["calculator".to_owned()]);
        assert_eq!(issued.expires_in, 30 * 60);

        let authenticated = manager.validate(&dir, &issued.access_token).unwrap();
        assert_eq!(authenticated.client.client_id, "c1");
        assert!(authenticated.has_scope("calculator"));
        assert!(!authenticated.has_scope("sse"));
    }

    #[test]
    fn test_scope_denied_is_fail_fast() {
        let manager = AuthManager::new(SECRET, 30);
        let dir = directory();

        let err = manager
            .issue(&dir, "c1", "s1", &["calculator".into(), "sse".into()])
            .unwrap_err();
        match err {
            AuthError::ScopeDenied { scope } => assert_eq!(scope, "sse"),
            other => panic!("expected ScopeDenied, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_secret_and_unknown_id_are_indistinguishable() {
        let manager = AuthManager::new(SECRET, 30);
        let dir = directory();

        let bad_secret = manager.issue(&dir, "c1", "nope", &[]).unwrap_err();
        let bad_id = manager.issue(&dir, "ghost", "s1", &[]).unwrap_err();
        assert_eq!(bad_secret.to_string(), bad_id.to_string());
    }

    #[test]
    fn test_zero_lifetime_token_is_immediately_expired() {
        let manager = AuthManager::new(SECRET, 0);
        let dir = directory();

        let issued = manager.issue(&dir, "c1", "s1", &[]).unwrap();
        let err = manager.validate(&dir, &issued.access_token).unwrap_err();
        assert!(matches!(err, AuthError::Expired { .. }));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = AuthManager::new(SECRET, 30);
        let err = manager
            .validate(&directory(), "not.a.token")
            .unwrap_err();
        assert!(matches!(err, AuthError::Malformed { .. }));
    }

    #[test]
    fn test_token_signed_with_other_key_is_malformed() {
        let manager = AuthManager::new(SECRET, 30);
        let other = AuthManager::new(b"some-other-secret", 30);
        let dir = directory();

        let issued = other.issue(&dir, "c1", "s1", &[]).unwrap();
        let err = manager.validate(&dir, &issued.access_token).unwrap_err();
        assert!(matches!(err, AuthError::Malformed { .. }));
    }

    #[test]
    fn test_subject_removed_from_directory() {
        let manager = AuthManager::new(SECRET, 30);
        let issued = manager.issue(&directory(), "c1", "s1", &[]).unwrap();

        let empty = ClientDirectory::from_records(vec![]);
        let err = manager.validate(&empty, &issued.access_token).unwrap_err();
        assert!(matches!(err, AuthError::UnknownSubject));
    }
}
