// ABOUTME: Server-Sent Events push channel: session registry, broadcast fan-out, HTTP routes
// ABOUTME: Groups the per-session queue machinery behind one module boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Message fan-out to one or all live sessions
pub mod broadcast;

/// Live session tracking with per-session FIFO queues
pub mod registry;

/// SSE connection handling and the broadcast trigger endpoint
pub mod routes;
