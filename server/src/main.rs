//! Warden Server - Main Entry Point
//!
//! Permission gate in front of role based HTTP APIs.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use warden_server::api;
use warden_server::config::Config;
use warden_server::db::{self, CallerStore, MemoryCallerStore, PgCallerStore};
use warden_server::permissions::{load_role_table, RoleTableHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Starting Warden Server"
    );

    // Caller store: PostgreSQL when configured, otherwise in-process
    let callers: Arc<dyn CallerStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgCallerStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using empty in-memory caller store");
            Arc::new(MemoryCallerStore::new())
        }
    };

    // A bad operator table is fatal here, never at decision time
    let roles = match &config.role_table_path {
        Some(path) => RoleTableHandle::new(load_role_table(path)?),
        None => {
            info!("ROLE_TABLE_PATH not set, using built-in role table");
            RoleTableHandle::default()
        }
    };

    let state = api::AppState::new(callers, roles, config.clone());

    #[cfg(unix)]
    spawn_role_table_reloader(state.clone());

    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Reload `ROLE_TABLE_PATH` on SIGHUP.
///
/// A table that fails to load leaves the current one in force.
#[cfg(unix)]
fn spawn_role_table_reloader(state: api::AppState) {
    use tokio::signal::unix::{signal, SignalKind};

    let Some(path) = state.config.role_table_path.clone() else {
        return;
    };

    tokio::spawn(async move {
        let mut hangups = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "SIGHUP handler unavailable, role table reload disabled");
                return;
            }
        };

        while hangups.recv().await.is_some() {
            match load_role_table(&path) {
                Ok(table) => {
                    state.roles.replace(table);
                    info!(path = %path.display(), "Role table reloaded");
                }
                Err(e) => {
                    tracing::error!(
                        error = %format!("{e:#}"),
                        "Role table reload failed, keeping current table"
                    );
                }
            }
        }
    });
}
