// ABOUTME: Static client registry mapping client identities to secrets and permitted scopes
// ABOUTME: Populated once at startup from configuration, read-only for the process lifetime
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Client Directory
//!
//! Process-lifetime registry of machine clients. The directory is an owned,
//! injectable component constructed at startup; it never mutates afterwards,
//! so lookups need no locking. Multi-tenant dynamism would replace this with
//! an external store behind the same `resolve` seam.

use crate::constants::{defaults, scopes};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered machine client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Client identity presented on token requests
    pub client_id: String,
    /// Shared secret the client authenticates with
    pub client_secret: String,
    /// Scopes this client is permitted to request
    pub scopes: Vec<String>,
}

impl ClientRecord {
    /// Whether this client may request the given scope
    #[must_use]
    pub fn allows_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Read-only lookup of registered clients
pub struct ClientDirectory {
    records: HashMap<String, ClientRecord>,
}

impl ClientDirectory {
    /// Build a directory from a fixed set of client records.
    ///
    /// Later duplicates of the same `client_id` win, matching how
    /// configuration overrides are layered.
    #[must_use]
    pub fn from_records(records: Vec<ClientRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.client_id.clone(), record))
            .collect();
        Self { records }
    }

    /// Resolve a client identity to its record
    #[must_use]
    pub fn resolve(&self, client_id: &str) -> Option<&ClientRecord> {
        self.records.get(client_id)
    }

    /// Number of registered clients
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no clients
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ClientDirectory {
    /// Directory seeded with the demonstration client used by the demo
    /// tooling
    fn default() -> Self {
        Self::from_records(vec![ClientRecord {
            client_id: defaults::DEMO_CLIENT_ID.to_owned(),
            client_secret: defaults::DEMO_CLIENT_SECRET.to_owned(),
            scopes: scopes::SUPPORTED.iter().map(|s| (*s).to_owned()).collect(),
        }])
    }
}
