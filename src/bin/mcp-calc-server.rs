// ABOUTME: Server binary wiring configuration, logging, and the HTTP router
// ABOUTME: Binds the listener and serves until interrupted
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # MCP Calc Server Binary
//!
//! Starts the calculator and push-channel demo server with `OAuth2`
//! client-credentials authentication.

use anyhow::Result;
use clap::Parser;
use mcp_calc_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes::build_router,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mcp-calc-server")]
#[command(about = "Calculator and SSE demo server with OAuth2 client-credentials auth")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting MCP Calc Server");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config));
    let router = build_router(resources);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");
    info!("Token endpoint:     http://localhost:{port}/token");
    info!("Calculator tools:   http://localhost:{port}/calculator/*");
    info!("Event stream:       http://localhost:{port}/events");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
