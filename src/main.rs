use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use datagate::config::{AppConfig, DatabaseConfig};
use datagate::database::{DatabaseManager, PgRepository};
use datagate::AppState;

#[derive(Parser)]
#[command(name = "datagate", version, about = "Role-gated data API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listen port, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("datagate=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Migrate => {
            let config = DatabaseConfig::from_env().context("failed to load database configuration")?;
            let database = DatabaseManager::connect(&config)
                .await
                .context("failed to connect to database")?;
            let result = database.migrate().await;
            database.close().await;
            result.context("failed to apply migrations")?;
        }
        Command::Serve { port } => {
            let mut config = AppConfig::from_env().context("failed to load configuration")?;
            if let Some(port) = port {
                config.server.port = port;
            }
            tracing::info!("Starting datagate in {:?} mode", config.environment);

            let database = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            let result = serve(&config, &database).await;
            database.close().await;
            result?;
        }
    }

    Ok(())
}

async fn serve(config: &AppConfig, database: &DatabaseManager) -> anyhow::Result<()> {
    if config.database.run_migrations {
        database.migrate().await.context("failed to apply migrations")?;
    }

    if config.security.using_fallback_secret {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let repo = Arc::new(PgRepository::new(database.pool().clone()));
    let state = AppState::new(config, repo).context("failed to build application state")?;
    let app = datagate::app(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
