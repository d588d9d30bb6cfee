// ABOUTME: Configuration management for runtime settings
// ABOUTME: Environment-variable driven; no configuration files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Environment-based server configuration
pub mod environment;
