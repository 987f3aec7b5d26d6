use anyhow::Context;
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;

use crate::app::{app, AppState};
use crate::auth::hash_password;
use crate::config::config;
use crate::database::{MemoryStore, PgStore};

#[derive(Parser)]
#[command(name = "thingful-api")]
#[command(about = "Things directory API with reviews and Basic authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT / THINGFUL_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Serve from an empty in-memory store instead of Postgres")]
        in_memory: bool,
    },

    #[command(about = "Print a bcrypt hash suitable for thingful_users.password")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, in_memory } => serve(port, in_memory).await,
        Commands::HashPassword { password } => {
            let cost = config().security.bcrypt_cost;
            let hash = hash_password(&password, cost).context("failed to hash password")?;
            println!("{}", hash);
            Ok(())
        }
    }
}

async fn serve(port: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    let config = config();
    tracing::info!("Starting Thingful API in {:?} mode", config.environment);

    let mut pg_store = None;
    let state = if in_memory {
        tracing::warn!("Serving from an empty in-memory store; data is lost on exit");
        AppState::new(MemoryStore::new())
    } else {
        let store = PgStore::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        pg_store = Some(store.clone());
        AppState::new(store)
    };

    let mut router = app(state);
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    let port = port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Thingful API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = pg_store {
        store.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
