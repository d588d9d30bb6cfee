// ABOUTME: Main library entry point for the MCP calculator demo server
// ABOUTME: Provides OAuth2 client-credentials auth, calculator tools, and SSE push channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # MCP Calc Server
//!
//! An HTTP server exposing calculator tools and a server-sent-events push
//! channel behind OAuth 2.0 client-credentials authentication.
//!
//! ## Features
//!
//! - **`OAuth2` token issuance**: client-credentials grant with per-client scope allowances
//! - **Bearer-gated tools**: calculator operations require the `calculator` scope
//! - **Push channels**: per-session SSE streams with FIFO delivery and broadcast fan-out
//! - **Discovery**: RFC 8414 well-known metadata documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcp_calc_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Token issuance and validation
pub mod auth;

/// Arithmetic tool operations
pub mod calculator;

/// Registered clients and their scope allowances
pub mod clients;

/// Configuration management
pub mod config;

/// Default values and shared string constants
pub mod constants;

/// Authentication error taxonomy and `HTTP` mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Bearer-token extraction and scope gating for handlers
pub mod middleware;

/// `OAuth2` token endpoint and discovery documents
pub mod oauth2;

/// Shared server resources injected into handlers
pub mod resources;

/// `HTTP` route assembly
pub mod routes;

/// Push-channel session registry, broadcast, and delivery
pub mod sse;
