use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use mural_server::config::Config;
use mural_server::telemetry::init_tracing;
use mural_server::{build_sqlite_url, connect_pool, routes, run_migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env è opzionale
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(&config.log_filter).context("init logging")?;

    // Costruisci l'URL del database SQLite
    let db_url = build_sqlite_url(&config.database_url).context("build sqlite DATABASE_URL")?;
    tracing::info!(%db_url, "using database");
    // Connetti al database
    let pool = connect_pool(&db_url, config.max_connections)
        .await
        .context("connect to sqlite")?;
    // Esegui le migrazioni del database
    run_migrations(&pool).await.context("run migrations")?;
    // Crea lo stato dell'applicazione condiviso
    let state = Arc::new(AppState::new(pool.clone()));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .context("bind tcp listener")?;
    tracing::info!("listening on http://{}", config.bind);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // senza segnale non si può spegnere in modo pulito: resta in ascolto
        tracing::error!(error = %e, "failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
