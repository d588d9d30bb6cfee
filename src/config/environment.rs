// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, secrets, token lifetimes, SSE timing, and the client seed list
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use crate::clients::ClientRecord;
use crate::constants::defaults;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment type for security-sensitive defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Token issuance settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in minutes
    pub token_expiry_minutes: i64,
}

/// Push-channel timing settings
#[derive(Debug, Clone)]
pub struct SseConfig {
    /// Idle delay between queue polls in the delivery loop
    pub poll_interval_ms: u64,
    /// Interval between keepalive comments
    pub keepalive_secs: u64,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port to bind
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Token issuance settings
    pub auth: AuthConfig,
    /// Push-channel timing settings
    pub sse: SseConfig,
    /// Client seed list for the directory
    pub clients: Vec<ClientRecord>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable fails to parse, or when running in
    /// production without an explicit `JWT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let http_port = parse_env_or("HTTP_PORT", defaults::HTTP_PORT)?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                bail!("JWT_SECRET must be set in production")
            }
            _ => {
                tracing::warn!("JWT_SECRET not set, using development-only default");
                "development-only-insecure-secret".to_owned()
            }
        };

        let auth = AuthConfig {
            jwt_secret,
            token_expiry_minutes: parse_env_or(
                "TOKEN_EXPIRY_MINUTES",
                defaults::TOKEN_EXPIRY_MINUTES,
            )?,
        };

        let sse = SseConfig {
            poll_interval_ms: parse_env_or("SSE_POLL_INTERVAL_MS", defaults::SSE_POLL_INTERVAL_MS)?,
            keepalive_secs: parse_env_or("SSE_KEEPALIVE_SECS", defaults::SSE_KEEPALIVE_SECS)?,
        };

        let clients = match env::var("MCP_CLIENTS") {
            Ok(raw) if !raw.is_empty() => parse_client_list(&raw)?,
            _ => default_clients(),
        };

        Ok(Self {
            http_port,
            environment,
            auth,
            sse,
            clients,
        })
    }

    /// One-line summary logged at startup; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} clients={} token_expiry={}m sse_poll={}ms",
            self.environment,
            self.http_port,
            self.clients.len(),
            self.auth.token_expiry_minutes,
            self.sse.poll_interval_ms,
        )
    }
}

/// Parse an environment variable or fall back to a default
fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid value for {name}")),
        Err(_) => Ok(default),
    }
}

/// Parse the `MCP_CLIENTS` seed list.
///
/// Format: comma-separated `client_id:client_secret:scope+scope` entries,
/// e.g. `c1:secret1:calculator+sse,c2:secret2:calculator`.
fn parse_client_list(raw: &str) -> Result<Vec<ClientRecord>> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let mut parts = entry.trim().splitn(3, ':');
            let client_id = parts
                .next()
                .filter(|s| !s.is_empty())
                .with_context(|| format!("missing client_id in MCP_CLIENTS entry: {entry}"))?;
            let client_secret = parts
                .next()
                .filter(|s| !s.is_empty())
                .with_context(|| format!("missing client_secret in MCP_CLIENTS entry: {entry}"))?;
            let scopes = parts
                .next()
                .unwrap_or("")
                .split('+')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();

            Ok(ClientRecord {
                client_id: client_id.to_owned(),
                client_secret: client_secret.to_owned(),
                scopes,
            })
        })
        .collect()
}

/// Demonstration client seeded when no list is configured
fn default_clients() -> Vec<ClientRecord> {
    vec![ClientRecord {
        client_id: defaults::DEMO_CLIENT_ID.to_owned(),
        client_secret: defaults::DEMO_CLIENT_SECRET.to_owned(),
        scopes: crate::constants::scopes::SUPPORTED
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
    }]
}
