use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use serenity::http::Http;
use serenity::interactions_endpoint::Verifier;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cards::catalog::StorageCatalog;
use crate::config::Config;
use crate::interactions::{CardCommand, RollCommand, SlashCommand};
use crate::server::AppState;

mod cards;
mod config;
mod game;
mod interactions;
mod registrar;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let verifier = Verifier::try_new(config.public_key)
        .map_err(|_| anyhow::anyhow!("PUBLIC_KEY is not a valid Ed25519 public key"))?;

    let http = Http::new(&config.token);
    http.set_application_id(config.app_id);

    let commands: Vec<Box<dyn SlashCommand>> = vec![Box::new(CardCommand), Box::new(RollCommand)];
    if let Err(err) = registrar::ensure_guild_commands(&http, config.guild_id, &commands).await {
        // The bot still answers already-installed commands.
        error!(error = %err, "failed to register guild commands");
    }

    let state = Arc::new(AppState {
        http,
        verifier,
        catalog: Box::new(StorageCatalog::new(config.storage_base.clone())?),
        media_base: config.storage_base,
        commands,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
