// ABOUTME: Fan-out of messages to every live SSE session plus targeted unicast
// ABOUTME: Counts sessions reached; sessions closing mid-broadcast are skipped
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::registry::{EventSessionRegistry, SessionId};
use std::sync::Arc;

/// Delivers messages into session queues, one or all at a time.
///
/// Broadcast is not atomic with respect to sessions opening concurrently: a
/// session opened mid-broadcast may or may not receive the message. That is
/// an accepted race. No ordering is guaranteed across sessions; within a
/// session, whichever enqueue completes first is dequeued first.
#[derive(Clone)]
pub struct BroadcastCoordinator {
    registry: Arc<EventSessionRegistry>,
}

impl BroadcastCoordinator {
    /// Create a coordinator over a shared registry
    #[must_use]
    pub fn new(registry: Arc<EventSessionRegistry>) -> Self {
        Self { registry }
    }

    /// Enqueue `message` into every currently-live session's queue.
    ///
    /// Returns the number of sessions reached. Sessions that close while the
    /// fan-out is in progress are skipped, not retried and not counted.
    pub fn broadcast(&self, message: &str) -> usize {
        let mut count = 0;
        self.registry.for_each_session(|_, queue| {
            queue.push_back(message.to_owned());
            count += 1;
        });
        tracing::info!("Message broadcast to {} session(s)", count);
        count
    }

    /// Enqueue `message` for a single session.
    ///
    /// Returns `false` if the session is already closed.
    pub fn unicast(&self, session_id: SessionId, message: impl Into<String>) -> bool {
        self.registry.enqueue(session_id, message)
    }
}
