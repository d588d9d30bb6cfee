// ABOUTME: Shared server resources constructed once at startup and injected into handlers
// ABOUTME: Replaces ambient singletons with an owned, testable dependency bundle
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::calculator::Calculator;
use crate::clients::ClientDirectory;
use crate::config::environment::ServerConfig;
use crate::middleware::AuthMiddleware;
use crate::sse::broadcast::BroadcastCoordinator;
use crate::sse::registry::EventSessionRegistry;
use std::sync::Arc;

/// Dependency bundle shared by every request handler.
///
/// Constructed at startup, torn down at shutdown; handlers receive it as
/// axum state. The session registry is the only mutable member.
pub struct ServerResources {
    /// Server configuration loaded from the environment
    pub config: Arc<ServerConfig>,
    /// Token issuance and validation
    pub auth_manager: Arc<AuthManager>,
    /// Registered clients and their scope allowances
    pub client_directory: Arc<ClientDirectory>,
    /// Live push-channel sessions
    pub session_registry: Arc<EventSessionRegistry>,
    /// Fan-out into session queues
    pub broadcaster: BroadcastCoordinator,
    /// Bearer-token extraction and scope gating
    pub auth_middleware: AuthMiddleware,
    /// Arithmetic tool operations
    pub calculator: Calculator,
}

impl ServerResources {
    /// Wire up the full resource graph from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_expiry_minutes,
        ));
        let client_directory = Arc::new(ClientDirectory::from_records(config.clients.clone()));
        let session_registry = Arc::new(EventSessionRegistry::new());
        let broadcaster = BroadcastCoordinator::new(Arc::clone(&session_registry));
        let auth_middleware =
            AuthMiddleware::new(Arc::clone(&auth_manager), Arc::clone(&client_directory));

        Self {
            config: Arc::new(config),
            auth_manager,
            client_directory,
            session_registry,
            broadcaster,
            auth_middleware,
            calculator: Calculator,
        }
    }
}
