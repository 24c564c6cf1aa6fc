use std::sync::Arc;

use anyhow::Context;
use quizforge_core::config::LayeredConfig;
use quizforge_store::postgres::{PostgresConfig, PostgresStore};
use quizforge_store::{MemoryThreadStore, ThreadStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizforge_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizforge_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let layered = LayeredConfig::load().context("Failed to load configuration")?;
    layered.validate().context("Invalid configuration")?;
    for (key, (value, source)) in layered.to_inspection_map() {
        tracing::debug!(key = %key, value = %value, source = ?source, "Configuration");
    }

    let config = ApiConfig::from_layered(&layered);

    tracing::info!(
        bind_address = %config.bind_address,
        llm_provider = %layered.llm_provider.value,
        llm_model = %layered.resolved_model(),
        "Starting QuizForge API server"
    );

    let thread_store = init_thread_store(&config).await?;
    let generator = quizforge_llm::generator_from_config(&layered)
        .context("Failed to configure the text generator")?;

    let state = Arc::new(AppState::new(generator, thread_store, config.search_timeout));
    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    tracing::info!("Listening on {}", config.bind_address);
    tracing::info!(origins = ?config.cors_origins, "CORS enabled");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Select the thread store: PostgreSQL when DATABASE_URL is set, memory otherwise
async fn init_thread_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn ThreadStore>> {
    if !config.uses_postgres() {
        tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
        return Ok(Arc::new(MemoryThreadStore::new()));
    }

    tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
    let pg_config = PostgresConfig::from_database_url(config.database_url.as_deref())
        .context("Invalid DATABASE_URL")?;

    let store = PostgresStore::with_migrations(pg_config).await.context(
        "Failed to connect to PostgreSQL. Ensure the server is running, \
         DATABASE_URL is correct, and the database exists",
    )?;

    Ok(Arc::new(store))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
