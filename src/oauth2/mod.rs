// ABOUTME: OAuth 2.0 authorization server surface: token exchange and discovery
// ABOUTME: Client-credentials grant only; tokens are stateless signed JWTs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Grant handling behind the token endpoint
pub mod endpoints;

/// OAuth 2.0 request/response wire structures
pub mod models;

/// HTTP routes for token exchange and RFC 8414 discovery
pub mod routes;
