// ABOUTME: Live SSE session registry with per-session FIFO message queues
// ABOUTME: Tracks open push-channel sessions and guarantees single teardown on disconnect
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Event Session Registry
//!
//! One entry per open push-channel connection. Every operation takes the
//! session's shard lock only for the duration of that single operation, so
//! traffic on different sessions never serializes. Enqueue and dequeue
//! against a session that has already closed are benign races and return
//! `false`/`None` rather than erroring.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier for one live push-channel session
pub type SessionId = Uuid;

/// Registry of live sessions and their pending-message queues
#[derive(Default)]
pub struct EventSessionRegistry {
    sessions: DashMap<SessionId, VecDeque<String>>,
}

impl EventSessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Allocate a new session with an empty queue and return its id.
    ///
    /// Ids are random v4 UUIDs; a collision among live sessions would need a
    /// duplicate UUID and is not a practical concern.
    pub fn open(&self) -> SessionId {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, VecDeque::new());
        tracing::info!("Session {} registered", session_id);
        session_id
    }

    /// Remove a session, discarding any still-queued messages.
    ///
    /// Delivery is best-effort: messages pending at disconnect are dropped,
    /// never retried. Returns whether the session was still live.
    pub fn close(&self, session_id: SessionId) -> bool {
        let removed = self.sessions.remove(&session_id).is_some();
        if removed {
            tracing::info!("Session {} removed", session_id);
        }
        removed
    }

    /// Append a message to a session's queue.
    ///
    /// Returns `false` if the session is unknown (already closed) — this is
    /// a normal outcome, not a fault.
    pub fn enqueue(&self, session_id: SessionId, message: impl Into<String>) -> bool {
        match self.sessions.get_mut(&session_id) {
            Some(mut queue) => {
                queue.push_back(message.into());
                true
            }
            None => false,
        }
    }

    /// Non-blocking FIFO pop of the next pending message.
    ///
    /// Returns `None` when the session is unknown or its queue is empty.
    pub fn try_dequeue(&self, session_id: SessionId) -> Option<String> {
        self.sessions
            .get_mut(&session_id)
            .and_then(|mut queue| queue.pop_front())
    }

    /// Number of currently live sessions
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Visit every live session id, applying `f` to each.
    ///
    /// Iteration locks one shard at a time; sessions opened or closed while
    /// the walk is in progress may or may not be visited.
    pub(crate) fn for_each_session(&self, mut f: impl FnMut(SessionId, &mut VecDeque<String>)) {
        for mut entry in self.sessions.iter_mut() {
            let id = *entry.key();
            f(id, entry.value_mut());
        }
    }
}

/// RAII teardown for a session owned by a connection handler.
///
/// The SSE stream can be dropped mid-await when the client disconnects, so
/// the handler cannot rely on code after its loop running. Dropping the
/// guard closes the session exactly once.
pub struct SessionGuard {
    registry: Arc<EventSessionRegistry>,
    session_id: SessionId,
}

impl SessionGuard {
    /// Take ownership of a session's teardown
    #[must_use]
    pub fn new(registry: Arc<EventSessionRegistry>, session_id: SessionId) -> Self {
        Self {
            registry,
            session_id,
        }
    }

    /// The guarded session's id
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(self.session_id);
    }
}
