// ABOUTME: HTTP server assembly: router construction, middleware layering, serving
// ABOUTME: Merges route groups, applies CORS and request tracing, and binds the port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # HTTP Server
//!
//! [`build_router`] assembles the full route table so tests can drive the
//! API in-process with `tower::ServiceExt::oneshot`; [`WodforgeServer::run`]
//! binds the port and serves until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, SpeechRoutes, WorkoutRoutes};

/// Build the complete API router with middleware layers applied
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources.clone()))
        .merge(SpeechRoutes::routes(resources))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The Wodforge HTTP server
pub struct WodforgeServer {
    resources: Arc<ServerResources>,
}

impl WodforgeServer {
    /// Create a server over pre-built resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured port and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server exits
    /// abnormally
    pub async fn run(self) -> Result<()> {
        let port = self.resources.config.http_port;
        let router = build_router(self.resources);

        let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind HTTP port {port}"))?;

        info!(port, "Wodforge API server listening");

        axum::serve(listener, router)
            .await
            .context("HTTP server exited abnormally")?;

        Ok(())
    }
}
