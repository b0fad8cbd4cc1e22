// ABOUTME: Wodforge API server binary with server-first secret bootstrap
// ABOUTME: Loads config, opens the store, wires resources, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Wodforge Server Binary
//!
//! Starts the workout planning API: SQLite storage, JWT sessions bootstrapped
//! from a server-stored secret, Gemini plan generation, and ElevenLabs speech.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use wodforge::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    llm::{GeminiProvider, LlmProvider},
    logging,
    resources::ServerResources,
    server::WodforgeServer,
    tts::ElevenLabsClient,
};

#[derive(Parser)]
#[command(name = "wodforge-server")]
#[command(about = "Wodforge - AI-assisted weekly workout planning API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database = wodforge::config::environment::DatabaseConfig {
            url: wodforge::config::environment::DatabaseUrl::parse_url(&database_url),
        };
    }

    logging::init_from_env()?;

    info!("Starting Wodforge API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url.to_connection_string());

    // Server-first bootstrap: the signing secret lives in the store so
    // restarts keep sessions valid
    let jwt_secret = database.get_or_create_system_secret("jwt_secret").await?;

    // Safe: JWT expiry hours are small positive configuration values
    #[allow(clippy::cast_possible_wrap)]
    let auth_manager = AuthManager::new(
        jwt_secret.as_bytes().to_vec(),
        config.auth.jwt_expiry_hours as i64,
    );
    info!("Authentication manager initialized");

    let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_config(&config.llm)?);
    info!("Plan generation provider ready: {}", llm.display_name());

    let tts = match ElevenLabsClient::from_config(&config.tts) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Text-to-speech disabled: {e}");
            None
        }
    };

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        llm,
        tts,
        Arc::new(config),
    ));

    WodforgeServer::new(resources).run().await
}
