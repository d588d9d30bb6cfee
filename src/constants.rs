// ABOUTME: Application constants and default configuration values
// ABOUTME: Central place for ports, token lifetimes, and SSE timing defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Application-wide constants

/// Default values applied when the environment provides no override
pub mod defaults {
    /// Default HTTP port the server binds to
    pub const HTTP_PORT: u16 = 8001;

    /// Bearer token lifetime in minutes
    pub const TOKEN_EXPIRY_MINUTES: i64 = 30;

    /// Idle delay between queue polls in the SSE delivery loop
    pub const SSE_POLL_INTERVAL_MS: u64 = 100;

    /// Interval between SSE keepalive comments
    pub const SSE_KEEPALIVE_SECS: u64 = 15;

    /// Demo client seeded when no client list is configured
    pub const DEMO_CLIENT_ID: &str = "example_client_id";
    /// Secret for the seeded demo client
    pub const DEMO_CLIENT_SECRET: &str = "example_client_secret";
}

/// Scope names understood by the server
pub mod scopes {
    /// Grants access to the calculator tool endpoints
    pub const CALCULATOR: &str = "calculator";

    /// Grants access to the SSE push channel
    pub const SSE: &str = "sse";

    /// Every scope the server advertises in discovery metadata
    pub const SUPPORTED: &[&str] = &[CALCULATOR, SSE];
}

/// Service identification for logging
pub mod service_names {
    /// Canonical service name
    pub const MCP_CALC_SERVER: &str = "mcp-calc-server";
}

/// OAuth2 protocol strings
pub mod oauth {
    /// The only grant type this server supports
    pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

    /// Token type returned on successful issuance
    pub const TOKEN_TYPE_BEARER: &str = "bearer";
}
